use std::collections::HashMap;

/// Case-insensitive name to byte-buffer mapping used for engine variables
/// and stored recipes. Keys are normalised to lowercase on every write and
/// lookup, matching the reference server's `strings.ToLower` convention.
#[derive(Debug, Default)]
pub struct VariableStore {
    values: HashMap<String, Vec<u8>>,
}

impl VariableStore {
    pub fn new() -> Self {
        VariableStore {
            values: HashMap::new(),
        }
    }

    pub fn set(&mut self, name: &str, value: Vec<u8>) {
        self.values.insert(name.to_lowercase(), value);
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.values.get(&name.to_lowercase()).map(|v| v.as_slice())
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<u8>)> {
        self.values.iter()
    }
}
