//! Built-in destination modules
//!
//! Each submodule is one connector targeting a third-party API.

pub mod singlestore;
pub mod stackadapt;

use crate::destination::Destination;
use crate::error::{Error, Result};

/// All built-in destinations
pub fn builtin() -> Vec<Box<dyn Destination>> {
    vec![
        Box::new(singlestore::SingleStore),
        Box::new(stackadapt::StackAdapt),
    ]
}

/// Look up a built-in destination by slug
pub fn find(slug: &str) -> Result<Box<dyn Destination>> {
    builtin()
        .into_iter()
        .find(|d| d.metadata().slug == slug)
        .ok_or_else(|| Error::UnknownDestination {
            slug: slug.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_slugs_are_unique() {
        let mut slugs: Vec<String> = builtin().iter().map(|d| d.metadata().slug).collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), builtin().len());
    }

    #[test]
    fn test_find_known_and_unknown() {
        assert!(find("singlestore").is_ok());
        assert!(find("stackadapt").is_ok());
        assert!(matches!(
            find("nope"),
            Err(Error::UnknownDestination { .. })
        ));
    }
}
