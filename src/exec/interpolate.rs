// src/exec/interpolate.rs

/// Placeholder replaced by the triggering file name.
pub const FILE_TOKEN: &str = "%f";

/// Substitute `file_name` for every `%f` in `template`.
///
/// A `%f` directly preceded by a backslash is an escape: the backslash is
/// dropped and the `%f` is kept literally. The scan is a single left-to-right
/// pass, so text coming from `file_name` is never scanned for tokens.
///
/// ```
/// use watchdo::exec::interpolate;
///
/// assert_eq!(
///     interpolate(r"A %f B \%f C %f D \%f E", "/x"),
///     "A /x B %f C /x D %f E",
/// );
/// ```
pub fn interpolate(template: &str, file_name: &str) -> String {
    let mut out = String::with_capacity(template.len() + file_name.len());
    let mut rest = template;

    while let Some(pos) = rest.find(FILE_TOKEN) {
        let (before, after) = rest.split_at(pos);

        match before.strip_suffix('\\') {
            Some(unescaped) => {
                out.push_str(unescaped);
                out.push_str(FILE_TOKEN);
            }
            None => {
                out.push_str(before);
                out.push_str(file_name);
            }
        }

        rest = &after[FILE_TOKEN.len()..];
    }

    out.push_str(rest);
    out
}
