/// Baseflow separation method identifiers.
///
/// A closed set of the fifteen supported methods. Names parse from the
/// lowercase identifiers used on the command line and in Python, including
/// the `usgs_hysep_*` aliases of the HYSEP methods.
use std::fmt;
use std::str::FromStr;

use crate::error::{BaseflowError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Method {
    Ukih,
    Local,
    Fixed,
    Slide,
    Lh,
    Chapman,
    Cm,
    Boughton,
    Furey,
    Eckhardt,
    Ewma,
    Willems,
    Ihacres,
    Strict,
    FiveDay,
}

impl Method {
    /// Every method, in the order `"all"` expands to.
    pub const ALL: [Method; 15] = [
        Method::Ukih,
        Method::Local,
        Method::Fixed,
        Method::Slide,
        Method::Lh,
        Method::Chapman,
        Method::Cm,
        Method::Boughton,
        Method::Furey,
        Method::Eckhardt,
        Method::Ewma,
        Method::Willems,
        Method::Ihacres,
        Method::Strict,
        Method::FiveDay,
    ];

    /// Canonical name, used as the result column key.
    pub fn name(self) -> &'static str {
        match self {
            Method::Ukih => "ukih",
            Method::Local => "local",
            Method::Fixed => "fixed",
            Method::Slide => "slide",
            Method::Lh => "lh",
            Method::Chapman => "chapman",
            Method::Cm => "cm",
            Method::Boughton => "boughton",
            Method::Furey => "furey",
            Method::Eckhardt => "eckhardt",
            Method::Ewma => "ewma",
            Method::Willems => "willems",
            Method::Ihacres => "ihacres",
            Method::Strict => "strict",
            Method::FiveDay => "five_day",
        }
    }

    /// Whether the method is driven by the recession coefficient `k`.
    pub fn needs_k(self) -> bool {
        matches!(
            self,
            Method::Chapman
                | Method::Cm
                | Method::Boughton
                | Method::Furey
                | Method::Eckhardt
                | Method::Willems
                | Method::Ihacres
        )
    }

    /// Whether the method reads the Lyne-Hollick baseflow, as a seed or as
    /// the fallback outside the turning points.
    pub fn needs_lh(self) -> bool {
        matches!(
            self,
            Method::Ukih
                | Method::Local
                | Method::Lh
                | Method::Chapman
                | Method::Cm
                | Method::Boughton
                | Method::Furey
                | Method::Eckhardt
                | Method::Ewma
                | Method::Willems
        )
    }

    /// Parse a comma-separated method list. `"all"` expands to [`Method::ALL`].
    pub fn parse_list(list: &str) -> Result<Vec<Method>> {
        let mut methods = Vec::new();
        for token in list.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            if token.eq_ignore_ascii_case("all") {
                methods.extend(Method::ALL);
            } else {
                methods.push(token.parse()?);
            }
        }
        Ok(methods)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = BaseflowError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        let method = match lower.as_str() {
            "usgs_hysep_fixed" => Method::Fixed,
            "usgs_hysep_local" => Method::Local,
            "usgs_hysep_slide" => Method::Slide,
            name => Method::ALL
                .into_iter()
                .find(|m| m.name() == name)
                .ok_or_else(|| BaseflowError::UnknownMethod(s.to_string()))?,
        };
        Ok(method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for m in Method::ALL {
            assert_eq!(m.name().parse::<Method>().unwrap(), m);
            assert_eq!(m.to_string(), m.name());
        }
    }

    #[test]
    fn hysep_aliases() {
        assert_eq!("usgs_hysep_fixed".parse::<Method>().unwrap(), Method::Fixed);
        assert_eq!("USGS_HYSEP_LOCAL".parse::<Method>().unwrap(), Method::Local);
        assert_eq!("usgs_hysep_slide".parse::<Method>().unwrap(), Method::Slide);
    }

    #[test]
    fn unknown_method_is_an_error() {
        assert_eq!(
            "kalman".parse::<Method>(),
            Err(BaseflowError::UnknownMethod("kalman".to_string()))
        );
    }

    #[test]
    fn parse_list_expands_all() {
        assert_eq!(Method::parse_list("all").unwrap().len(), 15);
        assert_eq!(
            Method::parse_list("lh, chapman").unwrap(),
            vec![Method::Lh, Method::Chapman]
        );
        assert!(Method::parse_list("lh,bogus").is_err());
    }

    #[test]
    fn recession_driven_methods() {
        let with_k: Vec<Method> = Method::ALL.into_iter().filter(|m| m.needs_k()).collect();
        assert_eq!(with_k.len(), 7);
        assert!(!Method::Ewma.needs_k());
        assert!(!Method::Ihacres.needs_lh());
        assert!(Method::Ewma.needs_lh());
    }
}
