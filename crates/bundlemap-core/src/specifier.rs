//! Module specifier parsing.
//!
//! Reduces the string used in an `import`/`require` to the identifier of the
//! package it points into:
//!
//! - `@babel/core/lib/index.js` -> `@babel/core`
//! - `@org/pkg@1.0.0-alpha.1` -> `@org/pkg@1.0.0-alpha.1`
//! - `lodash/fp` -> `lodash`
//! - `./local.js` -> `""` (local files have no package identity)

use thiserror::Error;

/// Reasons a specifier has no package identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpecifierError {
    /// The specifier is empty.
    #[error("empty specifier")]
    Empty,

    /// The specifier is a relative, absolute, or home-relative filesystem path.
    #[error("specifier is a local path")]
    LocalPath,

    /// A scoped specifier without a scope name or without a `/` after it.
    #[error("scoped specifier is missing its scope or package name")]
    MissingScopeName,

    /// No package name where one is expected (e.g. `@org/` or `@1.0.0`).
    #[error("specifier is missing a package name")]
    MissingName,
}

/// A specifier broken into its positional parts.
///
/// All parts borrow from the original string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleSpecifier<'a> {
    /// Scope including the leading `@`, e.g. `@babel`.
    pub scope: Option<&'a str>,
    /// Package name without scope or version.
    pub name: &'a str,
    /// Version tag attached to the name, without the `@`.
    pub version: Option<&'a str>,
    /// Path into the package after the name, without the leading `/`.
    pub subpath: Option<&'a str>,
}

impl ModuleSpecifier<'_> {
    /// Canonical `[@scope/]name[@version]` identifier.
    pub fn package_id(&self) -> String {
        let mut id = String::with_capacity(
            self.scope.map_or(0, |s| s.len() + 1)
                + self.name.len()
                + self.version.map_or(0, |v| v.len() + 1),
        );

        if let Some(scope) = self.scope {
            id.push_str(scope);
            id.push('/');
        }
        id.push_str(self.name);
        if let Some(version) = self.version {
            id.push('@');
            id.push_str(version);
        }

        id
    }

    /// True when the scope holds another `@` after its leading one
    /// (`@org@next/pkg`).
    ///
    /// Such scopes are kept verbatim up to the first `/`; callers may want to
    /// surface them since no registry publishes names of that shape.
    pub fn is_ambiguous(&self) -> bool {
        self.scope.is_some_and(|scope| scope[1..].contains('@'))
    }
}

/// Parser for module specifiers.
pub struct SpecifierParser;

impl SpecifierParser {
    /// Maps every specifier to its package identifier, in order.
    ///
    /// Specifiers without a package identity (local paths, malformed scopes)
    /// map to an empty string, so the output always lines up with the input.
    pub fn parse_all<S: AsRef<str>>(specifiers: &[S]) -> Vec<String> {
        specifiers
            .iter()
            .map(|specifier| {
                let specifier = specifier.as_ref();
                match Self::parse(specifier) {
                    Ok(parsed) => {
                        if parsed.is_ambiguous() {
                            tracing::warn!(
                                specifier,
                                scope = parsed.scope,
                                "scope contains more than one '@'; ending it at the first '/'"
                            );
                        }
                        parsed.package_id()
                    }
                    Err(reason) => {
                        tracing::trace!(specifier, %reason, "no package identity");
                        String::new()
                    }
                }
            })
            .collect()
    }

    /// Package identifier for a single specifier, or `""`.
    pub fn package_id(specifier: &str) -> String {
        Self::parse(specifier)
            .map(|parsed| parsed.package_id())
            .unwrap_or_default()
    }

    /// Splits a specifier into scope, name, version and subpath.
    pub fn parse(specifier: &str) -> Result<ModuleSpecifier<'_>, SpecifierError> {
        if specifier.is_empty() {
            return Err(SpecifierError::Empty);
        }
        if is_local_path(specifier) {
            return Err(SpecifierError::LocalPath);
        }

        // The first '/' after a leading '@' ends the scope, whatever it contains.
        let (scope, rest) = if specifier.starts_with('@') {
            match specifier.split_once('/') {
                Some((scope, rest)) if scope.len() > 1 => (Some(scope), rest),
                _ => return Err(SpecifierError::MissingScopeName),
            }
        } else {
            (None, specifier)
        };

        let name_end = rest.find(['@', '/']).unwrap_or(rest.len());
        let name = &rest[..name_end];
        if name.is_empty() {
            return Err(SpecifierError::MissingName);
        }

        let mut tail = &rest[name_end..];
        let mut version = None;
        if let Some(tagged) = tail.strip_prefix('@') {
            let tag_end = tagged.find('/').unwrap_or(tagged.len());
            version = Some(&tagged[..tag_end]).filter(|tag| !tag.is_empty());
            tail = &tagged[tag_end..];
        }

        let subpath = tail.strip_prefix('/').filter(|path| !path.is_empty());

        Ok(ModuleSpecifier {
            scope,
            name,
            version,
            subpath,
        })
    }
}

/// Relative (`./`, `../`), home-relative (`~/`) and absolute paths, with
/// either separator, including Windows drive paths.
fn is_local_path(specifier: &str) -> bool {
    if matches!(specifier, "." | ".." | "~") {
        return true;
    }

    const PREFIXES: [&str; 8] = ["./", "../", "~/", ".\\", "..\\", "~\\", "/", "\\"];
    if PREFIXES.iter().any(|prefix| specifier.starts_with(prefix)) {
        return true;
    }

    let bytes = specifier.as_bytes();
    bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && matches!(bytes[2], b'/' | b'\\')
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn relative_and_home_paths_have_no_identity(
            specifier in r"(\./|\.\./|~/)[a-z@./_-]{0,20}"
        ) {
            prop_assert_eq!(SpecifierParser::parse_all(&[specifier]), vec![String::new()]);
        }

        #[test]
        fn output_matches_input_length_and_order(
            specifiers in prop::collection::vec(r"[a-z@./~_-]{0,20}", 0..20)
        ) {
            let output = SpecifierParser::parse_all(&specifiers);
            prop_assert_eq!(output.len(), specifiers.len());
            for (specifier, id) in specifiers.iter().zip(&output) {
                prop_assert_eq!(id, &SpecifierParser::package_id(specifier));
            }
        }
    }
}
