//! Static fallback country table, used when the gateway's country list is
//! unreachable or empty.

use crate::core::currency::CountryRef;

pub const FALLBACK_COUNTRIES: [(&str, &str); 25] = [
    ("US", "United States"),
    ("GB", "United Kingdom"),
    ("TN", "Tunisia"),
    ("FR", "France"),
    ("CA", "Canada"),
    ("DE", "Germany"),
    ("JP", "Japan"),
    ("AU", "Australia"),
    ("CN", "China"),
    ("IN", "India"),
    ("BR", "Brazil"),
    ("MX", "Mexico"),
    ("IT", "Italy"),
    ("ES", "Spain"),
    ("RU", "Russia"),
    ("ZA", "South Africa"),
    ("EG", "Egypt"),
    ("SA", "Saudi Arabia"),
    ("AE", "United Arab Emirates"),
    ("TR", "Turkey"),
    ("KR", "South Korea"),
    ("NL", "Netherlands"),
    ("SE", "Sweden"),
    ("CH", "Switzerland"),
    ("SG", "Singapore"),
];

pub fn fallback_countries() -> Vec<CountryRef> {
    FALLBACK_COUNTRIES
        .iter()
        .map(|(code, name)| CountryRef::new(code, name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_table_is_well_formed() {
        let countries = fallback_countries();
        assert_eq!(countries.len(), 25);
        assert!(countries.iter().all(|c| !c.code.is_empty() && !c.name.is_empty()));
        assert_eq!(countries[0], CountryRef::new("US", "United States"));
    }
}
