use std::{fs::File, io::Read};

use serde_json::from_str;

use super::structs::TestData;

pub fn read_file() -> TestData {
    let mut file = File::open("tests/resources/bip47_vectors.json").unwrap();
    let mut contents = String::new();
    file.read_to_string(&mut contents).unwrap();
    from_str(&contents).unwrap()
}
