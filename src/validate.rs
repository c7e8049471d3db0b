//! Closed-schema validation of the parsed tree.
//!
//! Fail-fast: the first violation aborts the load with the connection name and
//! offending key. The rules are entirely schema-driven — per-driver key sets
//! live on [`Driver::schema`], so supporting a new driver does not touch this
//! module.

use crate::driver::Driver;
use crate::error::ConnfigError;
use crate::raw::RawValue;

/// Validate a parsed source tree: a mapping of connection-name → profile
/// mapping, each profile conforming to its driver's exact key set.
pub fn validate(root: &RawValue) -> Result<(), ConnfigError> {
    let Some(connections) = root.as_map() else {
        return Err(ConnfigError::Validation {
            connection: String::new(),
            key: String::new(),
            reason: "config root is not a mapping of connection profiles".into(),
        });
    };

    for (name, profile) in connections {
        validate_profile(name, profile)?;
    }
    Ok(())
}

fn validate_profile(name: &str, profile: &RawValue) -> Result<(), ConnfigError> {
    let Some(fields) = profile.as_map() else {
        return Err(ConnfigError::Validation {
            connection: name.to_string(),
            key: String::new(),
            reason: "connection entry is not a mapping".into(),
        });
    };

    let token = fields
        .get("driver")
        .and_then(RawValue::as_str)
        .unwrap_or_default();
    let Some(driver) = Driver::from_token(token) else {
        return Err(ConnfigError::DriverNotSupported {
            connection: name.to_string(),
            driver: token.to_string(),
        });
    };

    let schema = driver.schema();

    // Exact key set: anything the schema doesn't name is an error, never
    // silently ignored.
    for (key, value) in fields {
        if !schema.permits(key) {
            return Err(ConnfigError::Validation {
                connection: name.to_string(),
                key: key.clone(),
                reason: format!("key not permitted for driver '{driver}'"),
            });
        }
        if key == "attribute" {
            validate_attribute(name, value)?;
        } else if !value.is_scalar() {
            return Err(ConnfigError::Validation {
                connection: name.to_string(),
                key: key.clone(),
                reason: "expected a scalar value".into(),
            });
        }
    }

    for required in schema.required {
        if !fields.contains_key(*required) {
            return Err(ConnfigError::Validation {
                connection: name.to_string(),
                key: (*required).to_string(),
                reason: format!("required key missing for driver '{driver}'"),
            });
        }
    }

    Ok(())
}

/// `attribute` may be a single scalar, a sequence of scalars, or a mapping of
/// scalars. Entries must be strings or integers — the only token kinds the
/// attribute resolver understands.
fn validate_attribute(name: &str, value: &RawValue) -> Result<(), ConnfigError> {
    let entry_err = |reason: &str| ConnfigError::Validation {
        connection: name.to_string(),
        key: "attribute".into(),
        reason: reason.into(),
    };

    let entry_ok = |v: &RawValue| matches!(v, RawValue::String(_) | RawValue::Integer(_));

    match value {
        RawValue::String(_) | RawValue::Integer(_) => Ok(()),
        RawValue::Float(_) | RawValue::Bool(_) => {
            Err(entry_err("attribute entries must be strings or integers"))
        }
        RawValue::Seq(items) => items
            .iter()
            .all(entry_ok)
            .then_some(())
            .ok_or_else(|| entry_err("attribute entries must be strings or integers")),
        RawValue::Map(map) => map
            .values()
            .all(entry_ok)
            .then_some(())
            .ok_or_else(|| entry_err("attribute entries must be strings or integers")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use crate::format::Format;

    fn parse_json(text: &str) -> RawValue {
        Format::Json.parse(Path::new("/test.json"), text).unwrap()
    }

    #[test]
    fn valid_pgsql_profile_passes() {
        let raw = parse_json(
            r#"{"server": {"driver": "pgsql", "host": "localhost", "port": "5432",
                "dbname": "db", "username": "u", "password": "p",
                "attribute": {"ATTR_TIMEOUT": 30}}}"#,
        );
        assert!(validate(&raw).is_ok());
    }

    #[test]
    fn valid_sqlite_profile_passes() {
        let raw = parse_json(r#"{"local": {"driver": "sqlite", "path": "/var/db.sqlite"}}"#);
        assert!(validate(&raw).is_ok());
    }

    #[test]
    fn valid_sqlsrv_profile_passes() {
        let raw = parse_json(
            r#"{"ms": {"driver": "sqlsrv", "server": "s", "Database": "D", "username": "u"}}"#,
        );
        assert!(validate(&raw).is_ok());
    }

    #[test]
    fn root_must_be_mapping() {
        let raw = parse_json("[1, 2]");
        assert!(matches!(
            validate(&raw),
            Err(ConnfigError::Validation { .. })
        ));
    }

    #[test]
    fn profile_must_be_mapping() {
        let raw = parse_json(r#"{"server": "pgsql"}"#);
        let err = validate(&raw).unwrap_err();
        match err {
            ConnfigError::Validation { connection, .. } => assert_eq!(connection, "server"),
            other => panic!("Expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn missing_driver_is_driver_not_supported() {
        let raw = parse_json(r#"{"server": {"host": "localhost"}}"#);
        assert!(matches!(
            validate(&raw),
            Err(ConnfigError::DriverNotSupported { .. })
        ));
    }

    #[test]
    fn unknown_driver_is_driver_not_supported() {
        let raw = parse_json(r#"{"server": {"driver": "oracle"}}"#);
        let err = validate(&raw).unwrap_err();
        match err {
            ConnfigError::DriverNotSupported { connection, driver } => {
                assert_eq!(connection, "server");
                assert_eq!(driver, "oracle");
            }
            other => panic!("Expected DriverNotSupported, got {other:?}"),
        }
    }

    #[test]
    fn extra_key_is_rejected() {
        let raw = parse_json(r#"{"server": {"driver": "pgsql", "flavour": "extra"}}"#);
        let err = validate(&raw).unwrap_err();
        match err {
            ConnfigError::Validation { connection, key, .. } => {
                assert_eq!(connection, "server");
                assert_eq!(key, "flavour");
            }
            other => panic!("Expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn sqlite_requires_path() {
        let raw = parse_json(r#"{"local": {"driver": "sqlite"}}"#);
        let err = validate(&raw).unwrap_err();
        match err {
            ConnfigError::Validation { key, .. } => assert_eq!(key, "path"),
            other => panic!("Expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn sqlsrv_requires_username() {
        let raw = parse_json(r#"{"ms": {"driver": "sqlsrv", "server": "s", "Database": "D"}}"#);
        let err = validate(&raw).unwrap_err();
        match err {
            ConnfigError::Validation { key, .. } => assert_eq!(key, "username"),
            other => panic!("Expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn sqlite_rejects_pgsql_keys() {
        let raw = parse_json(r#"{"local": {"driver": "sqlite", "path": "/db", "host": "h"}}"#);
        let err = validate(&raw).unwrap_err();
        match err {
            ConnfigError::Validation { key, .. } => assert_eq!(key, "host"),
            other => panic!("Expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn attribute_scalar_is_accepted() {
        let raw = parse_json(
            r#"{"local": {"driver": "sqlite", "path": "/db", "attribute": "ERRMODE_SILENT"}}"#,
        );
        assert!(validate(&raw).is_ok());
    }

    #[test]
    fn attribute_sequence_is_accepted() {
        let raw = parse_json(
            r#"{"local": {"driver": "sqlite", "path": "/db", "attribute": ["A", 2]}}"#,
        );
        assert!(validate(&raw).is_ok());
    }

    #[test]
    fn attribute_nested_mapping_is_rejected() {
        let raw = parse_json(
            r#"{"local": {"driver": "sqlite", "path": "/db", "attribute": {"A": {"deep": 1}}}}"#,
        );
        let err = validate(&raw).unwrap_err();
        match err {
            ConnfigError::Validation { key, .. } => assert_eq!(key, "attribute"),
            other => panic!("Expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn non_attribute_field_must_be_scalar() {
        let raw = parse_json(r#"{"server": {"driver": "pgsql", "host": ["a", "b"]}}"#);
        let err = validate(&raw).unwrap_err();
        match err {
            ConnfigError::Validation { key, .. } => assert_eq!(key, "host"),
            other => panic!("Expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn fail_fast_reports_first_bad_connection() {
        let raw = parse_json(
            r#"{"good": {"driver": "sqlite", "path": "/db"},
                "bad": {"driver": "oracle"},
                "worse": "scalar"}"#,
        );
        let err = validate(&raw).unwrap_err();
        match err {
            ConnfigError::DriverNotSupported { connection, .. } => assert_eq!(connection, "bad"),
            other => panic!("Expected DriverNotSupported, got {other:?}"),
        }
    }
}
