//! Reusable field checks.
//!
//! Each check takes the value, the rule's parameters and the dotted path of
//! the field, and fails with a message of the form
//! `should <rule> but is <value>`.

use std::fmt::{Debug, Display};

use crate::error::ValidationError;

pub(crate) type Check = Result<(), ValidationError>;

fn fail(path: impl Display, message: String) -> ValidationError {
    ValidationError::new(path.to_string(), message)
}

pub(crate) fn equal_to(value: &str, expected: &str, path: impl Display) -> Check {
    if value == expected {
        return Ok(());
    }
    Err(fail(path, format!("should be equal to {expected} but is {value:?}")))
}

pub(crate) fn at_least<T: PartialOrd + Display>(value: T, min: T, path: impl Display) -> Check {
    if value >= min {
        return Ok(());
    }
    Err(fail(path, format!("should be at least {min} but is {value}")))
}

pub(crate) fn greater_than<T: PartialOrd + Display>(value: T, min: T, path: impl Display) -> Check {
    if value > min {
        return Ok(());
    }
    Err(fail(path, format!("should be greater than {min} but is {value}")))
}

pub(crate) fn in_range<T: PartialOrd + Display>(
    value: T,
    min: T,
    max: T,
    path: impl Display,
) -> Check {
    if value >= min && value <= max {
        return Ok(());
    }
    Err(fail(path, format!("should be in [{min}, {max}] but is {value}")))
}

pub(crate) fn one_of<T: PartialEq + Display + Debug>(
    value: T,
    allowed: &[T],
    path: impl Display,
) -> Check {
    if allowed.contains(&value) {
        return Ok(());
    }
    let allowed = allowed
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    Err(fail(path, format!("should be one of [{allowed}] but is {value:?}")))
}

pub(crate) fn not_empty(len: usize, path: impl Display) -> Check {
    if len > 0 {
        return Ok(());
    }
    Err(fail(path, "should not be empty".to_string()))
}

pub(crate) fn has_size(len: usize, size: usize, path: impl Display) -> Check {
    if len == size {
        return Ok(());
    }
    Err(fail(path, format!("should have size {size} but has size {len}")))
}

/// An index into a sibling list: non-negative, and below `bound` when one
/// is given.
pub(crate) fn reference(index: i64, bound: Option<usize>, path: impl Display) -> Check {
    if index < 0 {
        return Err(fail(path, format!("should be at least 0 but is {index}")));
    }
    match bound {
        Some(len) if index as u64 >= len as u64 => {
            Err(fail(path, format!("should be less than {len} but is {index}")))
        }
        _ => Ok(()),
    }
}

/// A present sub-object or field.
pub(crate) fn present<T>(value: Option<&T>, reason: impl Display, path: impl Display) -> Check {
    match value {
        Some(_) => Ok(()),
        None => Err(fail(path, format!("should be present {reason}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_of_message() {
        let err = one_of("FOO", &["OPAQUE", "MASK", "BLEND"], "materials[0].alphaMode")
            .unwrap_err();
        insta::assert_snapshot!(
            err,
            @r#"materials[0].alphaMode should be one of [OPAQUE, MASK, BLEND] but is "FOO""#
        );

        let err = one_of(1, &[34962, 34963], "bufferViews[0].target").unwrap_err();
        insta::assert_snapshot!(
            err,
            @"bufferViews[0].target should be one of [34962, 34963] but is 1"
        );
    }

    #[test]
    fn test_numeric_rules() {
        assert!(at_least(0, 0, "x").is_ok());
        assert!(greater_than(0.0, 0.0, "x").is_err());
        assert!(in_range(1.0, 0.0, 1.0, "x").is_ok());

        let err = in_range(1.5, 0.0, 1.0, "materials[2].pbrMetallicRoughness.metallicFactor")
            .unwrap_err();
        insta::assert_snapshot!(
            err,
            @"materials[2].pbrMetallicRoughness.metallicFactor should be in [0, 1] but is 1.5"
        );
    }

    #[test]
    fn test_reference_bounds() {
        assert!(reference(3, None, "nodes[0].mesh").is_ok());
        assert!(reference(2, Some(3), "nodes[0].mesh").is_ok());

        let err = reference(-1, None, "skins[0].joints[1]").unwrap_err();
        insta::assert_snapshot!(err, @"skins[0].joints[1] should be at least 0 but is -1");

        let err = reference(3, Some(3), "nodes[0].mesh").unwrap_err();
        insta::assert_snapshot!(err, @"nodes[0].mesh should be less than 3 but is 3");
    }

    #[test]
    fn test_sizes() {
        assert!(not_empty(1, "buffers").is_ok());
        assert_eq!(not_empty(0, "buffers").unwrap_err().to_string(), "buffers should not be empty");
        assert_eq!(
            has_size(3, 4, "baseColorFactor").unwrap_err().message,
            "should have size 4 but has size 3"
        );
    }
}
