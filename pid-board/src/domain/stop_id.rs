//! Stop identifier types.

use std::fmt;

/// Marker appended to a base id to address a specific boarding platform.
const PLATFORM_SUFFIX: char = 'P';

/// Error returned when parsing an invalid stop id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop id: {reason}")]
pub struct InvalidStopId {
    reason: &'static str,
}

/// A PID stop identifier in structured form.
///
/// The upstream API files departures under either the base id (`U1040Z12`)
/// or the platform id (`U1040Z12P`) of the same physical stop. A `StopId`
/// keeps the two apart explicitly so both forms can be produced on demand
/// and compared by physical stop.
///
/// # Examples
///
/// ```
/// use pid_board::domain::StopId;
///
/// let id = StopId::parse("U1040Z12P").unwrap();
/// assert_eq!(id.base(), "U1040Z12");
/// assert!(id.is_platform());
/// assert_eq!(id.platform_form(), "U1040Z12P");
///
/// // Both forms refer to the same physical stop
/// let base = StopId::parse("U1040Z12").unwrap();
/// assert!(base.same_stop(&id));
///
/// assert!(StopId::parse("").is_err());
/// assert!(StopId::parse("P").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopId {
    base: String,
    platform: bool,
}

impl StopId {
    /// Parse a stop id in either form.
    ///
    /// Surrounding whitespace is ignored. A trailing `P` marks the platform
    /// form; everything before it is the base id.
    pub fn parse(s: &str) -> Result<Self, InvalidStopId> {
        let s = s.trim();

        if s.is_empty() {
            return Err(InvalidStopId {
                reason: "must not be empty",
            });
        }

        match s.strip_suffix(PLATFORM_SUFFIX) {
            Some("") => Err(InvalidStopId {
                reason: "platform marker without a base id",
            }),
            Some(base) => Ok(Self {
                base: base.to_string(),
                platform: true,
            }),
            None => Ok(Self {
                base: s.to_string(),
                platform: false,
            }),
        }
    }

    /// The id without the platform marker.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Whether this id was given in platform form.
    pub fn is_platform(&self) -> bool {
        self.platform
    }

    /// The base form as an owned string.
    pub fn base_form(&self) -> String {
        self.base.clone()
    }

    /// The platform form (base + `P`) as an owned string.
    pub fn platform_form(&self) -> String {
        format!("{}{}", self.base, PLATFORM_SUFFIX)
    }

    /// The canonical platform key used to group departures for display.
    pub fn canonical(&self) -> StopId {
        Self {
            base: self.base.clone(),
            platform: true,
        }
    }

    /// Whether two ids refer to the same physical stop, regardless of form.
    pub fn same_stop(&self, other: &StopId) -> bool {
        self.base == other.base
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({self})")
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)?;
        if self.platform {
            write!(f, "{PLATFORM_SUFFIX}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_base_form() {
        let id = StopId::parse("U424Z1").unwrap();
        assert_eq!(id.base(), "U424Z1");
        assert!(!id.is_platform());
        assert_eq!(id.to_string(), "U424Z1");
    }

    #[test]
    fn parse_platform_form() {
        let id = StopId::parse("U424Z1P").unwrap();
        assert_eq!(id.base(), "U424Z1");
        assert!(id.is_platform());
        assert_eq!(id.to_string(), "U424Z1P");
    }

    #[test]
    fn parse_trims_whitespace() {
        let id = StopId::parse("  U337Z3P ").unwrap();
        assert_eq!(id.base(), "U337Z3");
    }

    #[test]
    fn reject_empty() {
        assert!(StopId::parse("").is_err());
        assert!(StopId::parse("   ").is_err());
        assert!(StopId::parse("P").is_err());
    }

    #[test]
    fn both_forms_from_either_input() {
        for input in ["U1040Z4", "U1040Z4P"] {
            let id = StopId::parse(input).unwrap();
            assert_eq!(id.base_form(), "U1040Z4");
            assert_eq!(id.platform_form(), "U1040Z4P");
        }
    }

    #[test]
    fn canonical_is_platform_form() {
        let a = StopId::parse("U1040Z4").unwrap().canonical();
        let b = StopId::parse("U1040Z4P").unwrap().canonical();
        assert_eq!(a, b);
        assert!(a.is_platform());
    }

    #[test]
    fn same_stop_ignores_form() {
        let a = StopId::parse("X").unwrap();
        let b = StopId::parse("XP").unwrap();
        let c = StopId::parse("Y").unwrap();
        assert!(a.same_stop(&b));
        assert!(!a.same_stop(&c));
        assert_ne!(a, b);
    }

    #[test]
    fn cis_style_numbers_parse() {
        let id = StopId::parse("56793").unwrap();
        assert_eq!(id.base(), "56793");
        assert!(!id.is_platform());
    }

    #[test]
    fn debug() {
        let id = StopId::parse("U1Z1P").unwrap();
        assert_eq!(format!("{:?}", id), "StopId(U1Z1P)");
    }
}
