/// Split a comma-separated progression ("Em, C#m7, G#m7b5") into symbols.
///
/// Whitespace is removed everywhere, not just trimmed, so "C maj7" reads as
/// "Cmaj7". Empty entries from doubled or trailing commas are dropped.
pub fn split_progression(input: &str) -> Vec<String> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    compact
        .split(',')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split every argument and concatenate, so both `"Em, Am"` and `Em Am` work.
pub fn split_arguments<S: AsRef<str>>(args: &[S]) -> Vec<String> {
    args.iter()
        .flat_map(|arg| split_progression(arg.as_ref()))
        .collect()
}
