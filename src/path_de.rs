use serde::de::DeserializeOwned;

use crate::error::Error;

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(what: &str, src: &str) -> Result<T, Error> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| Error::JsonAt {
        what: what.to_string(),
        path: err.path().to_string(),
        message: err.into_inner().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Outer {
        #[allow(unused)]
        inner: Inner,
    }

    #[derive(Debug, Deserialize)]
    struct Inner {
        #[allow(unused)]
        n: u32,
    }

    #[test]
    fn error_names_the_failing_path() {
        let err = from_str_with_path::<Outer>("test", r#"{"inner": {"n": "x"}}"#).unwrap_err();
        match err {
            Error::JsonAt { path, what, .. } => {
                assert_eq!(path, "inner.n");
                assert_eq!(what, "test");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
