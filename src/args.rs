//! Minimal command-line option parsing shared by the binaries.
//!
//! Each binary declares its valued options as (short, long) pairs plus its
//! boolean switches; everything else on the line is a plain target. Values
//! always come as the following argument (`-s 2`, `--scale 2`).

use std::collections::{HashMap, HashSet};

use anyhow::{bail, Context, Result};

#[derive(Debug, Default)]
pub struct Args {
    values: HashMap<String, String>,
    switches: HashSet<String>,
    targets: Vec<String>,
}

impl Args {
    /// Parse the process arguments. Unknown options are an error; missing
    /// ones are simply absent.
    pub fn parse(valued: &[(&str, &str)], switches: &[(&str, &str)]) -> Result<Self> {
        Self::from_iter(std::env::args().skip(1), valued, switches)
    }

    fn from_iter(
        args: impl IntoIterator<Item = String>,
        valued: &[(&str, &str)],
        switches: &[(&str, &str)],
    ) -> Result<Self> {
        let find = |name: &str, table: &[(&str, &str)]| {
            table
                .iter()
                .find(|(short, long)| (!short.is_empty() && name == *short) || name == *long)
                .map(|(_, long)| long.to_string())
        };

        let mut out = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let name = arg
                .strip_prefix("--")
                .or_else(|| arg.strip_prefix('-'))
                .unwrap_or("");
            if name.is_empty() {
                out.targets.push(arg);
                continue;
            }

            if let Some(long) = find(name, valued) {
                let value = args
                    .next()
                    .with_context(|| format!("option {} needs a value", arg))?;
                out.values.insert(long, value);
            } else if let Some(long) = find(name, switches) {
                out.switches.insert(long);
            } else {
                bail!("unknown option {}", arg);
            }
        }
        Ok(out)
    }

    /// Value of an option by its long name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Integer value of an option by its long name.
    pub fn get_int(&self, name: &str) -> Result<Option<i64>> {
        self.get(name)
            .map(|v| {
                v.parse()
                    .with_context(|| format!("option --{} expects a number, got {:?}", name, v))
            })
            .transpose()
    }

    /// Whether a boolean switch was given.
    pub fn is_set(&self, name: &str) -> bool {
        self.switches.contains(name)
    }

    /// Non-option arguments in order.
    pub fn targets(&self) -> &[String] {
        &self.targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &[&str]) -> Result<Args> {
        Args::from_iter(
            line.iter().map(|s| s.to_string()),
            &[("s", "scale"), ("f", "file"), ("", "seed")],
            &[("h", "help")],
        )
    }

    #[test]
    fn test_short_and_long_names() {
        let args = parse(&["-s", "2", "--file", "x.font"]).unwrap();
        assert_eq!(args.get("scale"), Some("2"));
        assert_eq!(args.get("file"), Some("x.font"));
        assert_eq!(args.get("seed"), None);
    }

    #[test]
    fn test_long_only_option() {
        let args = parse(&["--seed", "42"]).unwrap();
        assert_eq!(args.get_int("seed").unwrap(), Some(42));
    }

    #[test]
    fn test_switches_and_targets() {
        let args = parse(&["-h", "one", "two"]).unwrap();
        assert!(args.is_set("help"));
        assert!(!args.is_set("scale"));
        assert_eq!(args.targets(), &["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn test_missing_value_is_an_error() {
        assert!(parse(&["--scale"]).is_err());
    }

    #[test]
    fn test_unknown_option_is_an_error() {
        assert!(parse(&["--nope"]).is_err());
    }

    #[test]
    fn test_bad_integer_is_an_error() {
        let args = parse(&["-s", "two"]).unwrap();
        assert!(args.get_int("scale").is_err());
    }
}
