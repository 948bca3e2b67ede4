//! Shared fixtures for the integration tests
#![allow(dead_code)]

use std::io::Write;
use tempfile::NamedTempFile;

pub const MOCK_CONTENT: &str = "\
# This is a test entry
localhost:5432:*:kermit:

# Old entry
# bouncer:6000:*:rubber:buggy

bouncer:6000:*:rubber:buggy

# Another Test
foo.abjdite.us-east-1.redshift.amazonaws.com:5439:*:fonzy:b3ar
foo\\:bar:6000:*:baz:qux
";

/// Write a password file readable only by its owner
pub fn write_passfile(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    #[cfg(unix)]
    set_mode(file.path(), 0o600);
    file
}

#[cfg(unix)]
pub fn set_mode(path: &std::path::Path, mode: u32) {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).unwrap();
}
