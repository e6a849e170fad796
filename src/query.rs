//! Query string encoding for the upstream search API.
//!
//! Keys and values are escaped like a URI component. List values expand to
//! repeated `key[]=value` pairs, so `filter[suburb] = [1, 2]` becomes
//! `filter%5Bsuburb%5D[]=1&filter%5Bsuburb%5D[]=2`.

use std::fmt::Display;

/// A single query value: one scalar or a list of scalars
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Scalar(String),
    List(Vec<String>),
}

/// Ordered query parameters.
///
/// Setting an existing key replaces its value in place, keeping the key's
/// original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, QueryValue)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a scalar value
    pub fn set(&mut self, key: impl Into<String>, value: impl Display) -> &mut Self {
        self.insert(key.into(), QueryValue::Scalar(value.to_string()))
    }

    /// Set a list value, expanded to one `key[]` pair per element
    pub fn set_list<I, T>(&mut self, key: impl Into<String>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        let values = values.into_iter().map(|v| v.to_string()).collect();
        self.insert(key.into(), QueryValue::List(values))
    }

    /// Set a scalar value only when present
    pub fn set_opt<T: Display>(&mut self, key: impl Into<String>, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            self.set(key, value);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn insert(&mut self, key: String, value: QueryValue) -> &mut Self {
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.pairs.push((key, value)),
        }
        self
    }

    /// Encode as a query string (without the leading `?`)
    pub fn encode(&self) -> String {
        let mut parts = Vec::new();
        for (key, value) in &self.pairs {
            let key = urlencoding::encode(key);
            match value {
                QueryValue::Scalar(value) => {
                    parts.push(format!("{key}={}", urlencoding::encode(value)));
                }
                QueryValue::List(values) => {
                    parts.extend(
                        values
                            .iter()
                            .map(|value| format!("{key}[]={}", urlencoding::encode(value))),
                    );
                }
            }
        }
        parts.join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_pairs(query: &str) -> Vec<(String, String)> {
        query
            .split('&')
            .map(|pair| {
                let (key, value) = pair.split_once('=').expect("pair has '='");
                (
                    urlencoding::decode(key).unwrap().into_owned(),
                    urlencoding::decode(value).unwrap().into_owned(),
                )
            })
            .collect()
    }

    #[test]
    fn test_scalars_and_lists_keep_insertion_order() {
        let mut params = QueryParams::new();
        params
            .set_list("filter[suburb]", [1234, 99])
            .set("page[offset]", 0)
            .set("page[limit]", 20)
            .set("meta[aggs]", "popular.res_rent,popular.res_sale");

        assert_eq!(
            params.encode(),
            "filter%5Bsuburb%5D[]=1234&filter%5Bsuburb%5D[]=99&page%5Boffset%5D=0\
             &page%5Blimit%5D=20&meta%5Baggs%5D=popular.res_rent%2Cpopular.res_sale"
        );
    }

    #[test]
    fn test_decoding_recovers_original_pairs() {
        let mut params = QueryParams::new();
        params
            .set("q", "12 Queen St & Co/#?=+")
            .set_list("filter[category]", ["res_sale"])
            .set("flag", true)
            .set("ratio", 2.5);

        assert_eq!(
            decode_pairs(&params.encode()),
            vec![
                ("q".to_string(), "12 Queen St & Co/#?=+".to_string()),
                ("filter[category][]".to_string(), "res_sale".to_string()),
                ("flag".to_string(), "true".to_string()),
                ("ratio".to_string(), "2.5".to_string()),
            ]
        );
    }

    #[test]
    fn test_reserved_characters_are_escaped() {
        let mut params = QueryParams::new();
        params.set("k", "a&b=c+d#e?f/g h-_.~");
        assert_eq!(params.encode(), "k=a%26b%3Dc%2Bd%23e%3Ff%2Fg%20h-_.~");
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut params = QueryParams::new();
        params.set("a", 1).set("b", 2).set("a", 3);
        assert_eq!(params.encode(), "a=3&b=2");
        assert_eq!(params.get("a"), Some(&QueryValue::Scalar("3".into())));
    }

    #[test]
    fn test_optional_and_empty_values() {
        let mut params = QueryParams::new();
        params
            .set_opt("filter[bedroomsMin]", Some(2))
            .set_opt("filter[bedroomsMax]", None::<u32>)
            .set_list("filter[suburb]", Vec::<u32>::new());

        assert_eq!(params.len(), 2);
        assert_eq!(params.encode(), "filter%5BbedroomsMin%5D=2");
    }
}
