//! Parsing of `key=value` search filters given on the command line.

use crate::search::SearchQuery;

/// Build a query from `key=value` arguments, keeping argument order.
///
/// Values may be wrapped in double quotes. Values are kept as text; numeric
/// fields parse them at comparison time. Empty values are dropped like any
/// other blank query value.
///
/// # Example
/// ```
/// use lineage::io::parse_filters;
///
/// let args = vec!["name=ram".to_string(), "generation=3".to_string()];
/// let query = parse_filters(&args).unwrap();
/// assert_eq!(query.len(), 2);
/// ```
pub fn parse_filters(args: &[String]) -> Result<SearchQuery, String> {
    let mut query = SearchQuery::new();
    for arg in args {
        let (key, value) = arg
            .split_once('=')
            .ok_or_else(|| format!("Filter '{arg}' is not in key=value form"))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(format!("Filter '{arg}' has an empty field name"));
        }
        query.push(key, unquote(value.trim()));
    }
    Ok(query)
}

fn unquote(value: &str) -> &str {
    if value.len() > 1 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Scalar;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_key_value_pairs() {
        let query = parse_filters(&args(&["familyId=F1", "bloodGroup=O+"])).unwrap();
        let names: Vec<_> = query.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["familyId", "bloodGroup"]);
        assert_eq!(query.get("bloodGroup"), Some(&Scalar::from("O+")));
    }

    #[test]
    fn test_parse_quoted_value() {
        let query = parse_filters(&args(&["about=\"temple records\""])).unwrap();
        assert_eq!(query.get("about"), Some(&Scalar::from("temple records")));
    }

    #[test]
    fn test_value_may_contain_equals() {
        let query = parse_filters(&args(&["about=a=b"])).unwrap();
        assert_eq!(query.get("about"), Some(&Scalar::from("a=b")));
    }

    #[test]
    fn test_empty_value_is_dropped() {
        let query = parse_filters(&args(&["name="])).unwrap();
        assert!(query.is_empty());
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(parse_filters(&args(&["name"])).is_err());
        assert!(parse_filters(&args(&["=ram"])).is_err());
    }
}
