use std::collections::BTreeMap;

use bracket_qs::{DecodeOptions, ErrorKind, QueryObject, QueryValue};
use rstest::rstest;
use serde::{Deserialize, Serialize};
use serde_json::json;

fn list(items: &[&str]) -> QueryValue {
    QueryValue::List(items.iter().map(|item| item.to_string()).collect())
}

fn object(entries: Vec<(&str, QueryValue)>) -> QueryObject {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

#[rstest]
#[case(object(vec![]), "")]
#[case(object(vec![("a", "1".into())]), "?a=1")]
#[case(object(vec![("a", list(&["1", "2", "3"]))]), "?a=1,2,3")]
#[case(
    object(vec![("a", object(vec![("b", object(vec![("c", "1".into())]).into())]).into())]),
    "?a[b][c]=1"
)]
#[case(object(vec![("a", "hello world".into())]), "?a=hello%20world")]
#[case(object(vec![("", object(vec![("a", "1".into())]).into())]), "?[a]=1")]
fn encode_object(#[case] input: QueryObject, #[case] expected: &str) {
    assert_eq!(bracket_qs::encode(&input).unwrap(), expected);
}

#[rstest]
#[case(object(vec![("a", "1".into()), ("b", "2".into())]))]
#[case(object(vec![("a", list(&["x,y", "z&w", "é"]))]))]
#[case(object(vec![
    ("user", object(vec![
        ("name", "Ada Lovelace".into()),
        ("tags", list(&["math", "engines"])),
        ("address", object(vec![("city", "London".into())]).into()),
    ]).into()),
    ("page", "2".into()),
]))]
#[case(object(vec![("a", "".into()), ("b", list(&["", ""]))]))]
#[case(object(vec![("k%20ey", "v=1&2".into())]))]
fn encode_then_decode_round_trips(#[case] input: QueryObject) {
    let encoded = bracket_qs::encode(&input).unwrap();
    let decoded = bracket_qs::decode(&encoded).unwrap();
    assert_eq!(decoded, input, "via {encoded:?}");
}

#[rstest]
#[case(object(vec![("a", list(&["1"]))]))]
#[case(object(vec![("a", object(vec![("b", list(&["x y"]))]).into())]))]
fn single_element_lists_round_trip_with_always_arrays(#[case] input: QueryObject) {
    let options = DecodeOptions::new().with_always_arrays(true);
    let encoded = bracket_qs::encode(&input).unwrap();
    let decoded = bracket_qs::decode_with_options(&encoded, &options).unwrap();
    assert_eq!(decoded, input);
}

#[test]
fn single_element_list_collapses_without_always_arrays() {
    let encoded = bracket_qs::encode(&object(vec![("a", list(&["1"]))])).unwrap();
    assert_eq!(encoded, "?a=1");
    let decoded = bracket_qs::decode(&encoded).unwrap();
    assert_eq!(decoded["a"], QueryValue::from("1"));
}

#[rstest]
#[case(object(vec![("a[b", "1".into())]), "a[b")]
#[case(object(vec![("a", object(vec![("b]", "1".into())]).into())]), "b]")]
#[case(object(vec![("a=b", "1".into())]), "a=b")]
#[case(object(vec![("a&b", "1".into())]), "a&b")]
fn encode_rejects_structural_keys(#[case] input: QueryObject, #[case] segment: &str) {
    let err = bracket_qs::encode(&input).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Encode);
    assert_eq!(err.fragment.as_deref(), Some(segment));
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Address {
    city: String,
    postcode: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Profile {
    name: String,
    address: Address,
    roles: Vec<String>,
    #[serde(default)]
    nickname: Option<String>,
}

#[test]
fn from_str_into_struct() {
    let profile: Profile = bracket_qs::from_str(
        "?name=Acme&address[city]=Carrot%20City&address[postcode]=12345&roles=admin,dev",
    )
    .unwrap();

    assert_eq!(
        profile,
        Profile {
            name: "Acme".to_string(),
            address: Address {
                city: "Carrot City".to_string(),
                postcode: "12345".to_string(),
            },
            roles: vec!["admin".to_string(), "dev".to_string()],
            nickname: None,
        }
    );
}

#[test]
fn from_str_single_role_needs_always_arrays() {
    let query = "?name=Acme&address[city]=X&address[postcode]=1&roles=admin";

    let err = bracket_qs::from_str::<Profile>(query).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Deserialize);

    #[derive(Debug, Deserialize)]
    struct Roles {
        roles: Vec<String>,
    }
    let options = DecodeOptions::new().with_always_arrays(true);
    let roles: Roles = bracket_qs::from_str_with_options("?roles=admin", &options).unwrap();
    assert_eq!(roles.roles, ["admin"]);
}

#[test]
fn to_string_then_from_str_round_trips() {
    let profile = Profile {
        name: "Ada".to_string(),
        address: Address {
            city: "London, UK".to_string(),
            postcode: "N1".to_string(),
        },
        roles: vec!["a".to_string(), "b".to_string()],
        nickname: Some("countess".to_string()),
    };
    let query = bracket_qs::to_string(&profile).unwrap();
    assert_eq!(
        query,
        "?name=Ada&address[city]=London%2C%20UK&address[postcode]=N1&roles=a,b&nickname=countess"
    );
    let back: Profile = bracket_qs::from_str(&query).unwrap();
    assert_eq!(back, profile);
}

#[test]
fn to_string_from_map() {
    let mut params = BTreeMap::new();
    params.insert("limit", json!(10));
    params.insert("sort", json!(["name", "-age"]));
    params.insert("filter", json!({"active": true}));

    assert_eq!(
        bracket_qs::to_string(&params).unwrap(),
        "?filter[active]=true&limit=10&sort=name,-age"
    );
}
