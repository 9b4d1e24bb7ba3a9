use std::collections::HashMap;

#[derive(PartialEq, Debug)]
pub struct QueryString {
    items: HashMap<String, String>,
}

impl QueryString {
    pub fn from(buf: &str) -> Self {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(buf).unwrap_or_else(|_| vec![]);
        let items: HashMap<String, String> = pairs.into_iter().collect();

        QueryString {
            items,
        }
    }

    /// `?page=N`, clamped to 1 for anything unparseable or non-positive.
    pub fn page(&self) -> u32 {
        self.items.get("page")
            .and_then(|val| val.parse::<u32>().ok())
            .filter(|&page| page > 0)
            .unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page() {
        assert_eq!(QueryString::from("page=4").page(), 4);
        assert_eq!(QueryString::from("tag=rust&page=2").page(), 2);
        assert_eq!(QueryString::from("page=0").page(), 1);
        assert_eq!(QueryString::from("page=-3").page(), 1);
        assert_eq!(QueryString::from("page=banana").page(), 1);
        assert_eq!(QueryString::from("").page(), 1);
    }

    #[test]
    fn test_parse_query_str() {
        let buf = "bread=baguette&cheese=comt%C3%A9";
        let qs = QueryString::from(buf);
        assert_eq!(qs.items.get("bread").unwrap(), "baguette");
        assert_eq!(qs.items.get("cheese").unwrap(), "comté");
    }

    #[test]
    fn test_parse_key_only_query_str() {
        let qs = QueryString::from("key-only");
        assert_eq!(qs.items.get("key-only").unwrap(), "");
    }
}
