//! Encoding of advanced search criteria for the classic search form.
//!
//! The form expects a fixed parameter layout. Database and catalog toggles
//! are sent only when set; every other field is always sent, with an empty
//! value when absent.

use crate::models::AdvancedSearchCriteria;

/// Settings appended to every advanced query
const FIXED_DEFAULTS: &[(&str, &str)] = &[
    ("nr_to_return", "200"),
    ("start_nr", "1"),
    ("sort", "SCORE"),
    ("aut_syn", "YES"),
    ("ttl_syn", "YES"),
    ("txt_syn", "YES"),
    ("data_type", "SHORT"),
];

/// Ordered `(name, value)` pairs for `criteria`, values not yet encoded
pub fn advanced_params(criteria: &AdvancedSearchCriteria) -> Vec<(&'static str, String)> {
    let mut params: Vec<(&'static str, String)> = Vec::new();

    let toggles = [
        (criteria.astronomy, "db_key", "AST"),
        (criteria.physics, "db_key", "PHY"),
        (criteria.preprints, "db_key", "PRE"),
        (criteria.simbad, "sim_query", "YES"),
        (criteria.ned, "ned_query", "YES"),
        (criteria.ads_objects, "adsobj_query", "YES"),
    ];
    params.extend(
        toggles
            .iter()
            .filter(|(on, _, _)| *on)
            .map(|(_, name, value)| (*name, value.to_string())),
    );

    params.push(("aut_logic", criteria.author_logic.token().to_string()));
    params.push(("obj_logic", criteria.object_logic.token().to_string()));
    params.push(("author", criteria.authors.join(";")));
    params.push(("object", criteria.object.clone()));

    let dates = &criteria.dates;
    params.push(("start_mon", optional(dates.start_month)));
    params.push(("start_year", optional(dates.start_year)));
    params.push(("end_mon", optional(dates.end_month)));
    params.push(("end_year", optional(dates.end_year)));

    params.push(("ttl_logic", criteria.title_logic.token().to_string()));
    params.push(("title", criteria.title.clone()));
    params.push(("txt_logic", criteria.abstract_logic.token().to_string()));
    params.push(("text", criteria.abstract_text.clone()));

    params.extend(
        FIXED_DEFAULTS
            .iter()
            .map(|(name, value)| (*name, value.to_string())),
    );

    params
}

/// Encode `criteria` as a query string (without the leading `?`)
///
/// Spaces become `+`; other reserved characters are percent-encoded.
pub fn encode_advanced(criteria: &AdvancedSearchCriteria) -> String {
    advanced_params(criteria)
        .iter()
        .map(|(name, value)| format!("{}={}", name, form_encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn form_encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.trim().as_bytes()).collect()
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ListLogic, TextLogic};

    fn names(criteria: &AdvancedSearchCriteria) -> Vec<&'static str> {
        advanced_params(criteria).into_iter().map(|(n, _)| n).collect()
    }

    #[test]
    fn test_empty_criteria_emits_every_field() {
        let encoded = encode_advanced(&AdvancedSearchCriteria::new());

        assert_eq!(
            encoded,
            "aut_logic=OR&obj_logic=OR&author=&object=&start_mon=&start_year=&end_mon=&end_year=\
             &ttl_logic=OR&title=&txt_logic=OR&text=\
             &nr_to_return=200&start_nr=1&sort=SCORE&aut_syn=YES&ttl_syn=YES&txt_syn=YES&data_type=SHORT"
        );
    }

    #[test]
    fn test_toggles_are_presence_only() {
        let criteria = AdvancedSearchCriteria::new()
            .databases(true, false, true)
            .catalogs(false, true, false);

        let names = names(&criteria);
        assert_eq!(&names[..3], &["db_key", "db_key", "ned_query"]);

        let encoded = encode_advanced(&criteria);
        assert!(encoded.starts_with("db_key=AST&db_key=PRE&ned_query=YES&aut_logic=OR"));
        assert!(!encoded.contains("PHY"));
        assert!(!encoded.contains("sim_query"));
    }

    #[test]
    fn test_free_text_encoding() {
        let criteria = AdvancedSearchCriteria::new()
            .author("Quataert, E.")
            .author("Foo, B.")
            .author_logic(ListLogic::And)
            .object("M 87")
            .title("heat flux driven", TextLogic::Simple)
            .abstract_text("thermal conduction", TextLogic::Bool);

        let encoded = encode_advanced(&criteria);
        assert!(encoded.contains("aut_logic=AND"));
        assert!(encoded.contains("author=Quataert%2C+E.%3BFoo%2C+B."));
        assert!(encoded.contains("object=M+87"));
        assert!(encoded.contains("ttl_logic=SIMPLE&title=heat+flux+driven"));
        assert!(encoded.contains("txt_logic=BOOL&text=thermal+conduction"));
        assert!(!encoded.contains(' '));
    }

    #[test]
    fn test_date_range() {
        let criteria = AdvancedSearchCriteria::new()
            .since(Some(3), 2001)
            .until(None, 2008);

        let encoded = encode_advanced(&criteria);
        assert!(encoded.contains("start_mon=3&start_year=2001&end_mon=&end_year=2008"));
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let criteria = AdvancedSearchCriteria::new()
            .databases(true, true, true)
            .author("Einstein, A.")
            .title("relativity", TextLogic::And);

        assert_eq!(encode_advanced(&criteria), encode_advanced(&criteria.clone()));
    }

    #[test]
    fn test_field_order_is_fixed() {
        let names = names(&AdvancedSearchCriteria::new().catalogs(true, true, true));
        let position = |name: &str| names.iter().position(|n| *n == name).unwrap();

        assert!(position("sim_query") < position("aut_logic"));
        assert!(position("author") < position("object"));
        assert!(position("end_year") < position("ttl_logic"));
        assert!(position("text") < position("nr_to_return"));
        assert_eq!(names.last(), Some(&"data_type"));
    }
}
