use chrono::NaiveDate;
use courier::binding::{
    Arguments, CompositeDescriptor, ConversionError, ConversionProvider, Describe,
    NamingConvention, ParameterDescriptor, ParameterMap, ScalarKind, TypeDescriptor,
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Deserialize, PartialEq)]
struct Address {
    city: String,
    zip: Option<u32>,
}

impl Describe for Address {
    fn describe() -> TypeDescriptor {
        CompositeDescriptor::new("Address")
            .field::<String>("city")
            .field::<Option<u32>>("zip")
            .build()
    }
}

#[derive(Debug, Deserialize, PartialEq)]
struct User {
    name: String,
    age: u8,
    active: bool,
    tags: Vec<String>,
    address: Option<Address>,
}

impl Describe for User {
    fn describe() -> TypeDescriptor {
        CompositeDescriptor::new("User")
            .field::<String>("name")
            .field::<u8>("age")
            .field::<bool>("active")
            .field::<Vec<String>>("tags")
            .field::<Option<Address>>("address")
            .build()
    }
}

fn convert(body: &str, prefix: &str, target: &TypeDescriptor) -> Result<Value, ConversionError> {
    ConversionProvider::new().convert(prefix, target, &ParameterMap::parse(body))
}

#[test]
fn scalar_takes_first_value() {
    let value = convert("n=7&n=8", "n", &i32::describe()).unwrap();
    assert_eq!(value, json!(7));
}

#[test]
fn absent_scalars_bind_defaults_or_null() {
    assert_eq!(convert("", "n", &i64::describe()).unwrap(), json!(0));
    assert_eq!(convert("", "b", &bool::describe()).unwrap(), json!(false));
    assert_eq!(convert("", "s", &String::describe()).unwrap(), json!(""));
    assert_eq!(convert("", "o", &Option::<i64>::describe()).unwrap(), Value::Null);
    assert_eq!(convert("", "d", &NaiveDate::describe()).unwrap(), Value::Null);
}

#[test]
fn malformed_scalar_names_key_and_target() {
    let err = convert("count=abc", "count", &u32::describe()).unwrap_err();

    match &err {
        ConversionError::InvalidScalar { key, target, value, .. } => {
            assert_eq!(key, "count");
            assert_eq!(target, "u32");
            assert_eq!(value, "abc");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.key(), Some("count"));
    assert!(err.to_string().contains("count"));
}

#[test]
fn repeated_key_binds_ordered_collection() {
    let value = convert("items=1&items=2&items=3", "items", &Vec::<i32>::describe()).unwrap();
    assert_eq!(value, json!([1, 2, 3]));

    let strings = convert("items=1&items=2&items=3", "items", &Vec::<String>::describe()).unwrap();
    assert_eq!(strings, json!(["1", "2", "3"]));
}

#[test]
fn missing_collection_is_empty() {
    let value = convert("other=1", "items", &Vec::<i32>::describe()).unwrap();
    assert_eq!(value, json!([]));
}

#[test]
fn collection_element_failure_aborts() {
    let err = convert("ids=1&ids=x", "ids", &Vec::<u64>::describe()).unwrap_err();
    assert_eq!(err.key(), Some("ids"));
}

#[test]
fn scalar_collection_falls_back_to_indexed_keys() {
    let value = convert("ids[1]=20&ids[0]=10&ids[0]=11", "ids", &Vec::<u16>::describe()).unwrap();
    assert_eq!(value, json!([10, 11, 20]));
}

#[test]
fn set_removes_duplicates_after_conversion() {
    let value = convert("n=3&n=1&n=03&n=1", "n", &BTreeSet::<u8>::describe()).unwrap();
    assert_eq!(value, json!([3, 1]));
}

#[test]
fn composite_binds_properties_under_namespace() {
    let body = "user.name=alice&user.age=30&user.active=on&user.tags=a&user.tags=b\
                &user.address.city=Paris";
    let value = convert(body, "user", &User::describe()).unwrap();

    let user: User = serde_json::from_value(value).unwrap();
    assert_eq!(
        user,
        User {
            name: "alice".into(),
            age: 30,
            active: true,
            tags: vec!["a".into(), "b".into()],
            address: Some(Address {
                city: "Paris".into(),
                zip: None,
            }),
        }
    );
}

#[test]
fn composite_without_keys_is_default_instance() {
    let value = convert("unrelated=1", "user", &User::describe()).unwrap();
    assert_eq!(
        value,
        json!({
            "name": "",
            "age": 0,
            "active": false,
            "tags": [],
            "address": null,
        })
    );
}

#[test]
fn required_property_must_be_addressed() {
    let target = CompositeDescriptor::new("Login")
        .required_field::<String>("username")
        .field::<Option<String>>("password")
        .build();

    let err = convert("login.password=x", "login", &target).unwrap_err();
    assert!(matches!(
        &err,
        ConversionError::MissingRequired { key, .. } if key == "login.username"
    ));

    // Present but empty still counts as addressed
    let value = convert("login.username=", "login", &target).unwrap();
    assert_eq!(value, json!({ "username": "", "password": null }));
}

#[test]
fn composite_elements_bind_by_index() {
    let body = "addrs[1].city=Rome&addrs[0].city=Oslo&addrs[0].zip=150";
    let value = convert(body, "addrs", &Vec::<Address>::describe()).unwrap();
    let addresses: Vec<Address> = serde_json::from_value(value).unwrap();

    assert_eq!(
        addresses,
        vec![
            Address { city: "Oslo".into(), zip: Some(150) },
            Address { city: "Rome".into(), zip: None },
        ]
    );
}

#[test]
fn dynamic_map_discovers_keys() {
    let body = "scores.alice=10&scores.bob=7&other.x=1&scores.alice=99";
    let value = convert(body, "scores", &HashMap::<String, i32>::describe()).unwrap();
    assert_eq!(value, json!({ "alice": 10, "bob": 7 }));
}

#[test]
fn dynamic_map_of_composites() {
    let body = "homes.main.city=Lyon&homes.summer.city=Nice&homes.summer.zip=6000";
    let value = convert(body, "homes", &HashMap::<String, Address>::describe()).unwrap();
    assert_eq!(
        value,
        json!({
            "main": { "city": "Lyon", "zip": null },
            "summer": { "city": "Nice", "zip": 6000 },
        })
    );
}

#[test]
fn dynamic_map_validates_key_type() {
    let err = convert("m.one=1", "m", &HashMap::<u32, String>::describe()).unwrap_err();
    assert!(matches!(err, ConversionError::InvalidMapKey { ref key, .. } if key == "m.one"));
    assert_eq!(err.key(), Some("m.one"));
}

#[test]
fn static_map_behaves_like_composite() {
    let target = TypeDescriptor::keyed_map(
        ScalarKind::String,
        TypeDescriptor::Scalar(ScalarKind::F64),
        ["min", "max"],
    );
    let value = convert("range.max=9.5&range.extra=1", "range", &target).unwrap();
    assert_eq!(value, json!({ "min": 0.0, "max": 9.5 }));
}

#[test]
fn required_parameter_must_be_addressed() {
    let provider = ConversionProvider::new();
    let parameter = ParameterDescriptor::of::<User>().required();

    let err = provider
        .convert_parameter("user", &parameter, &ParameterMap::parse("x=1"))
        .unwrap_err();
    assert!(matches!(err, ConversionError::MissingRequired { ref key, .. } if key == "user"));

    assert!(provider
        .convert_parameter("user", &parameter, &ParameterMap::parse("user.name=a"))
        .is_ok());
}

#[test]
fn custom_naming_convention() {
    let convention = NamingConvention::new("_", "(", ")").unwrap();
    let provider = ConversionProvider::with_convention(convention);
    let parameters = ParameterMap::parse("addr_city=Bern&list(0)_city=Zug");

    let value = provider.convert("addr", &Address::describe(), &parameters).unwrap();
    assert_eq!(value, json!({ "city": "Bern", "zip": null }));

    let list = provider
        .convert("list", &Vec::<Address>::describe(), &parameters)
        .unwrap();
    assert_eq!(list, json!([{ "city": "Zug", "zip": null }]));
}

#[test]
fn configured_convention_rejects_empty_delimiters() {
    let result = serde_json::from_str::<NamingConvention>(r#"{"property_separator": ""}"#);
    let err = result.unwrap_err();
    assert!(err.to_string().contains("property_separator"));

    assert!(serde_json::from_str::<NamingConvention>(r#"{"index_open": ""}"#).is_err());
}

#[test]
fn configured_convention_binds_dynamic_maps() {
    let convention: NamingConvention =
        serde_json::from_str(r#"{"property_separator": "_"}"#).unwrap();
    assert_eq!(convention.index_open(), "[");

    let provider = ConversionProvider::with_convention(convention);
    let value = provider
        .convert(
            "map",
            &HashMap::<String, i32>::describe(),
            &ParameterMap::parse("map_alice=1&map_bob=2&mapcarol=3"),
        )
        .unwrap();
    assert_eq!(value, json!({ "alice": 1, "bob": 2 }));
}

#[test]
fn binding_is_deterministic() {
    let provider = ConversionProvider::new();
    let parameters = ParameterMap::parse("user.name=a&user.tags=x&user.tags=y&user.age=3");
    let target = User::describe();

    let first = provider.convert("user", &target, &parameters).unwrap();
    for _ in 0..8 {
        assert_eq!(provider.convert("user", &target, &parameters).unwrap(), first);
    }
}

#[test]
fn concurrent_binding_shares_one_provider() {
    let provider = ConversionProvider::new();
    let target = Vec::<u32>::describe();

    std::thread::scope(|scope| {
        for worker in 0..4u32 {
            let provider = &provider;
            let target = &target;
            scope.spawn(move || {
                let body = format!("n={worker}&n={}", worker + 1);
                let value = provider
                    .convert("n", target, &ParameterMap::parse(&body))
                    .unwrap();
                assert_eq!(value, json!([worker, worker + 1]));
            });
        }
    });
}

#[test]
fn typed_argument_extraction() {
    let arguments = Arguments::new(vec![json!(5), json!("five")]);

    assert_eq!(arguments.arg::<u8>(0).unwrap(), 5);
    assert_eq!(arguments.arg::<String>(1).unwrap(), "five");
    assert_eq!(arguments.arg::<Option<String>>(2).unwrap(), None);
    assert!(matches!(
        arguments.arg::<u8>(1),
        Err(ConversionError::Argument { index: 1, .. })
    ));
}
