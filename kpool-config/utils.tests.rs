use super::*;

#[derive(Serialize)]
struct Paths {
    #[serde(serialize_with = "sorted_map")]
    paths: HashMap<String, String>,
}

#[test]
fn sorted_map_test() {
    let paths = Paths {
        paths: HashMap::from([
            ("storage.k8s.io".to_owned(), "/apis".to_owned()),
            ("batch".to_owned(), "/apis".to_owned()),
            ("apps".to_owned(), "/custom".to_owned()),
        ]),
    };

    let serialized = serde_yaml::to_string(&paths).unwrap();

    assert_eq!("paths:\n  apps: /custom\n  batch: /apis\n  storage.k8s.io: /apis\n", serialized);
}
