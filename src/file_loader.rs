//! File loading utilities for user-supplied level files.

use std::fs;

use color_eyre::eyre::{OptionExt as _, Result};

use crate::level::{Level, LevelSet};

/// Scans the current directory for `.flowmap` files and loads them.
///
/// This function searches for files with the `.flowmap` extension in the current working
/// directory, parses each one with the level parser, and appends every valid file as a
/// one-level set for user selection. Files that fail to parse are skipped and processing
/// continues with the remaining ones.
///
/// # Errors
///
/// This function returns an error if the directory cannot be read or a file name cannot be
/// converted to a string slice.
pub(crate) fn fetch_sets(sets: &mut Vec<LevelSet>) -> Result<()> {
    for file in fs::read_dir(".")? {
        match file {
            Ok(file)
                if !file.file_type()?.is_dir()
                    && file
                        .file_name()
                        .to_str()
                        .ok_or_eyre("failed to convert osstring to string slice")?
                        .ends_with(".flowmap") =>
            {
                let contents = fs::read_to_string(file.path())?;

                let mut key = file
                    .file_name()
                    .to_str()
                    .ok_or_eyre("failed to convert osstring to string slice")?
                    .to_owned();
                key.truncate({
                    key.rfind(".flowmap")
                        .ok_or_eyre("failed to find extension in file name")?
                });

                if let Ok(level) = Level::parse(&key, &contents) {
                    sets.push(LevelSet {
                        key,
                        levels: vec![level],
                    });
                }
            }
            Err(err) => return Err(err.into()),
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_contents_become_a_one_level_set() {
        let level =
            Level::parse("custom", "5\nblue 0,0 4,4\ngreen 0,4 4,0").expect("contents parse");
        let set = LevelSet {
            key: "custom".to_owned(),
            levels: vec![level],
        };

        assert_eq!(set.levels.len(), 1, "one file maps to one level");
        assert_eq!(
            set.levels.first().map(|entry| entry.key.as_str()),
            Some("custom"),
            "the level inherits the file key"
        );
    }

    #[test]
    fn test_invalid_contents_are_rejected() {
        assert!(
            Level::parse("broken", "5\nblue 0,0 9,9").is_err(),
            "out-of-range files must not load"
        );
    }
}
