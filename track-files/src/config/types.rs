use crate::common::reader::parse_flag;

/// An ordered tree of `key = value` pairs. Every node carries a (possibly empty) value and its
/// children in file order, so both plain keys and whole sections are `ConfigTree`s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigTree {
    value: String,
    children: Vec<(String, ConfigTree)>,
}

impl ConfigTree {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            children: Vec::new(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty() && self.children.is_empty()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn children(&self) -> impl Iterator<Item = (&str, &ConfigTree)> {
        self.children.iter().map(|(key, tree)| (key.as_str(), tree))
    }

    pub fn child(&self, key: &str) -> Option<&ConfigTree> {
        self.children
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, tree)| tree)
    }

    /// Resolves a path of nested children, e.g. `["object", "tree", "body"]`.
    pub fn child_path<'a>(&self, path: impl IntoIterator<Item = &'a str>) -> Option<&ConfigTree> {
        path.into_iter()
            .try_fold(self, |tree, segment| tree.child(segment))
    }

    pub fn child_mut_or_insert(&mut self, key: &str) -> &mut ConfigTree {
        let index = match self.children.iter().position(|(name, _)| name == key) {
            Some(index) => index,
            None => {
                self.children.push((key.to_string(), ConfigTree::default()));
                self.children.len() - 1
            }
        };

        &mut self.children[index].1
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.child_mut_or_insert(key).set_value(value);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.child(key).is_some()
    }

    /// Reads and converts the value of the direct child `key`. Missing keys and values that
    /// don't convert both yield `None`.
    pub fn get<T: FromConfigValue>(&self, key: &str) -> Option<T> {
        self.child(key)
            .and_then(|tree| T::from_config_value(tree.value()))
    }

    pub fn get_or<T: FromConfigValue>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }
}

pub trait FromConfigValue: Sized {
    fn from_config_value(value: &str) -> Option<Self>;
}

impl FromConfigValue for String {
    fn from_config_value(value: &str) -> Option<Self> {
        Some(value.to_string())
    }
}

impl FromConfigValue for bool {
    fn from_config_value(value: &str) -> Option<Self> {
        parse_flag(value)
    }
}

macro_rules! impl_from_config_value_parse {
    ($($ty:ty),*) => {
        $(
            impl FromConfigValue for $ty {
                fn from_config_value(value: &str) -> Option<Self> {
                    value.trim().parse::<$ty>().ok()
                }
            }
        )*
    };
}

impl_from_config_value_parse!(f32, i32, u32, usize);

impl FromConfigValue for Vec<f32> {
    fn from_config_value(value: &str) -> Option<Self> {
        value
            .split(',')
            .map(|component| component.trim().parse::<f32>().ok())
            .collect()
    }
}

impl FromConfigValue for [f32; 3] {
    fn from_config_value(value: &str) -> Option<Self> {
        let components = Vec::<f32>::from_config_value(value)?;
        if components.len() < 3 {
            return None;
        }

        Some([components[0], components[1], components[2]])
    }
}

/// Comma separated list, e.g. `texture = diffuse.png, misc1.png, normal.png`. Empty entries are
/// kept so positional meaning survives (`a.png,,c.png`).
impl FromConfigValue for Vec<String> {
    fn from_config_value(value: &str) -> Option<Self> {
        Some(
            value
                .split(',')
                .map(|entry| entry.trim().to_string())
                .collect(),
        )
    }
}
