//! Remote path handling for Graph item addressing.
//!
//! Graph addresses items by relative path with literal `/` separators, so
//! only the final segment (the filename) is percent-encoded before being
//! embedded in a request URL. Directory segments pass through untouched.

/// Percent-encode the final segment of a relative remote path.
///
/// Empty input is returned unchanged. Applied to every remote path before
/// it is embedded in a request URL.
pub fn encode_remote_path(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }

    match path.rfind('/') {
        Some(idx) => {
            let (directory, filename) = (&path[..idx], &path[idx + 1..]);
            format!("{}/{}", directory, urlencoding::encode(filename))
        }
        None => urlencoding::encode(path).into_owned(),
    }
}

/// Split a destination path into (directory, filename).
///
/// A path without separators has an empty directory part.
pub(crate) fn split_dest_path(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(idx) => (&path[..idx], &path[idx + 1..]),
        None => ("", path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encodes_only_filename() {
        assert_eq!(
            encode_remote_path("folder/sub dir/my file.txt"),
            "folder/sub dir/my%20file.txt"
        );
    }

    #[test]
    fn test_bare_filename() {
        assert_eq!(encode_remote_path("report #1.pdf"), "report%20%231.pdf");
    }

    #[test]
    fn test_plain_paths_unchanged() {
        assert_eq!(encode_remote_path("a/b/c.txt"), "a/b/c.txt");
        assert_eq!(encode_remote_path("c.txt"), "c.txt");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(encode_remote_path(""), "");
    }

    #[test]
    fn test_directory_portion_idempotent() {
        let once = encode_remote_path("sub dir/my file.txt");
        assert_eq!(once, "sub dir/my%20file.txt");
        // Re-encoding touches only the filename part
        assert_eq!(
            encode_remote_path(&once),
            "sub dir/my%2520file.txt"
        );
    }

    #[test]
    fn test_split_dest_path() {
        assert_eq!(split_dest_path("a/b/c.txt"), ("a/b", "c.txt"));
        assert_eq!(split_dest_path("c.txt"), ("", "c.txt"));
        assert_eq!(split_dest_path("dir/"), ("dir", ""));
    }
}
