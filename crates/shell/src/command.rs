//! The closed command surface.
//!
//! Parsing maps (verb, ordered string args) onto [`Command`] so dispatch is
//! an exhaustive match instead of a chain of string comparisons, and an
//! unknown verb is rejected up front. Everything that can fail without
//! touching the store (arity, role and status names, numeric form) fails
//! here, before any state is read or written.

use coldtrace_ledger_types::{LedgerError, NewPackage, PackageStatus, Result, Role};

/// A fully parsed and validated command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Write an empty package index; run once at bootstrap.
    Init,
    /// Create a new package record and index it.
    Create(NewPackage),
    /// Provider accepts the package: `Created → InTransit`.
    Accept {
        /// Package id.
        id: String,
        /// Submitted provider identity.
        provider: String,
    },
    /// Apply a temperature reading, possibly damaging the package.
    RecordTemperature {
        /// Package id.
        id: String,
        /// Temperature reading.
        reading: i32,
    },
    /// Provider hands the package to the consignee: `→ Delivered`.
    Deliver {
        /// Package id.
        id: String,
        /// Submitted provider identity.
        provider: String,
    },
    /// Fetch a single record.
    QueryById {
        /// Package id.
        id: String,
    },
    /// Fetch the raw index contents.
    QueryAllIds,
    /// Fetch every record in creation order.
    QueryAll,
    /// Fetch the records in a given lifecycle status.
    QueryByStatus {
        /// Status to match.
        status: PackageStatus,
    },
    /// Fetch the records whose role field equals a value.
    QueryByRole {
        /// Which identity field to compare.
        role: Role,
        /// Value the field must equal.
        value: String,
    },
    /// Fetch the records matching a role value and a status.
    QueryByRoleAndStatus {
        /// Which identity field to compare.
        role: Role,
        /// Value the field must equal.
        value: String,
        /// Status to match.
        status: PackageStatus,
    },
}

impl Command {
    /// Parses a verb and its ordered string arguments.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for an unknown verb, wrong arity, a bad
    /// role or status name, or a non-numeric temperature.
    pub fn parse(verb: &str, args: &[String]) -> Result<Self> {
        match verb {
            "init" => {
                expect_arity(verb, args, 0)?;
                Ok(Self::Init)
            },
            "create" => {
                expect_arity(verb, args, 8)?;
                Ok(Self::Create(NewPackage {
                    id: args[0].clone(),
                    shipper: args[1].clone(),
                    insurer: args[2].clone(),
                    consignee: args[3].clone(),
                    provider: args[4].clone(),
                    temperature_min: parse_temperature(verb, "tempMin", &args[5])?,
                    temperature_max: parse_temperature(verb, "tempMax", &args[6])?,
                    description: args[7].clone(),
                }))
            },
            "accept" => {
                expect_arity(verb, args, 2)?;
                Ok(Self::Accept { id: args[0].clone(), provider: args[1].clone() })
            },
            "recordTemperature" => {
                expect_arity(verb, args, 2)?;
                Ok(Self::RecordTemperature {
                    id: args[0].clone(),
                    reading: parse_temperature(verb, "reading", &args[1])?,
                })
            },
            "deliver" => {
                expect_arity(verb, args, 2)?;
                Ok(Self::Deliver { id: args[0].clone(), provider: args[1].clone() })
            },
            "queryById" => {
                expect_arity(verb, args, 1)?;
                Ok(Self::QueryById { id: args[0].clone() })
            },
            "queryAllIds" => {
                expect_arity(verb, args, 0)?;
                Ok(Self::QueryAllIds)
            },
            "queryAll" => {
                expect_arity(verb, args, 0)?;
                Ok(Self::QueryAll)
            },
            "queryByStatus" => {
                expect_arity(verb, args, 1)?;
                Ok(Self::QueryByStatus { status: args[0].parse()? })
            },
            "queryByRole" => {
                expect_arity(verb, args, 2)?;
                Ok(Self::QueryByRole { role: args[0].parse()?, value: args[1].clone() })
            },
            "queryByRoleAndStatus" => {
                expect_arity(verb, args, 3)?;
                Ok(Self::QueryByRoleAndStatus {
                    role: args[0].parse()?,
                    value: args[1].clone(),
                    status: args[2].parse()?,
                })
            },
            other => Err(LedgerError::InvalidArgument {
                message: format!("unknown verb {other:?}"),
            }),
        }
    }

    /// The verb this command parses from.
    #[must_use]
    pub const fn verb(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Create(_) => "create",
            Self::Accept { .. } => "accept",
            Self::RecordTemperature { .. } => "recordTemperature",
            Self::Deliver { .. } => "deliver",
            Self::QueryById { .. } => "queryById",
            Self::QueryAllIds => "queryAllIds",
            Self::QueryAll => "queryAll",
            Self::QueryByStatus { .. } => "queryByStatus",
            Self::QueryByRole { .. } => "queryByRole",
            Self::QueryByRoleAndStatus { .. } => "queryByRoleAndStatus",
        }
    }
}

fn expect_arity(verb: &str, args: &[String], want: usize) -> Result<()> {
    if args.len() == want {
        Ok(())
    } else {
        Err(LedgerError::InvalidArgument {
            message: format!("{verb} expects {want} argument(s), got {}", args.len()),
        })
    }
}

fn parse_temperature(verb: &str, name: &str, raw: &str) -> Result<i32> {
    raw.parse().map_err(|_| LedgerError::InvalidArgument {
        message: format!("{verb}: {name} must be a decimal integer, got {raw:?}"),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn create_parses_in_documented_argument_order() {
        let args = strings(&["PKG1", "S1", "I1", "C1", "P1", "-5", "5", "meds"]);
        let command = Command::parse("create", &args).expect("parse");

        let Command::Create(package) = command else {
            panic!("expected create, got {command:?}");
        };
        assert_eq!(package.id, "PKG1");
        assert_eq!(package.shipper, "S1");
        assert_eq!(package.insurer, "I1");
        assert_eq!(package.consignee, "C1");
        assert_eq!(package.provider, "P1");
        assert_eq!(package.temperature_min, -5);
        assert_eq!(package.temperature_max, 5);
        assert_eq!(package.description, "meds");
    }

    #[test]
    fn wrong_arity_is_invalid_argument() {
        for (verb, args) in [
            ("create", strings(&["PKG1"])),
            ("accept", strings(&["PKG1"])),
            ("deliver", strings(&["PKG1", "P1", "extra"])),
            ("queryAll", strings(&["surplus"])),
            ("init", strings(&["surplus"])),
        ] {
            let err = Command::parse(verb, &args).unwrap_err();
            assert!(matches!(err, LedgerError::InvalidArgument { .. }), "verb {verb}");
        }
    }

    #[test]
    fn unknown_verb_is_invalid_argument() {
        let err = Command::parse("transmogrify", &[]).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidArgument { .. }));
        assert!(err.to_string().contains("transmogrify"));
    }

    #[test]
    fn non_numeric_temperature_is_invalid_argument() {
        let args = strings(&["PKG1", "S1", "I1", "C1", "P1", "cold", "5", "meds"]);
        let err = Command::parse("create", &args).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidArgument { .. }));

        let err = Command::parse("recordTemperature", &strings(&["PKG1", "1.5"])).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidArgument { .. }));
    }

    #[test]
    fn negative_temperatures_parse() {
        let command =
            Command::parse("recordTemperature", &strings(&["PKG1", "-40"])).expect("parse");
        assert_eq!(command, Command::RecordTemperature { id: "PKG1".to_string(), reading: -40 });
    }

    #[test]
    fn bad_role_name_fails_before_any_scan() {
        let err = Command::parse("queryByRole", &strings(&["Owner", "P1"])).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidArgument { .. }));
    }

    #[test]
    fn bad_status_name_fails_before_any_scan() {
        let err = Command::parse(
            "queryByRoleAndStatus",
            &strings(&["Provider", "P1", "Exploded"]),
        )
        .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidArgument { .. }));
    }

    #[test]
    fn query_verbs_parse_their_enums() {
        let command = Command::parse(
            "queryByRoleAndStatus",
            &strings(&["Consignee", "C1", "Delivered"]),
        )
        .expect("parse");
        assert_eq!(
            command,
            Command::QueryByRoleAndStatus {
                role: Role::Consignee,
                value: "C1".to_string(),
                status: PackageStatus::Delivered,
            }
        );

        let command = Command::parse("queryByStatus", &strings(&["InTransit"])).expect("parse");
        assert_eq!(command, Command::QueryByStatus { status: PackageStatus::InTransit });
    }

    #[test]
    fn verb_round_trips_through_parse() {
        let cases = [
            ("init", vec![]),
            ("queryAllIds", vec![]),
            ("queryAll", vec![]),
            ("queryById", strings(&["PKG1"])),
            ("accept", strings(&["PKG1", "P1"])),
        ];
        for (verb, args) in cases {
            let command = Command::parse(verb, &args).expect("parse");
            assert_eq!(command.verb(), verb);
        }
    }
}
