use std::sync::Arc;

use crate::error::{VmError, VmResult};
use crate::util::fast_map::{FastHashMap, fast_hash_map_new};

use super::{Kind, Val};

/// Host method: receives the value it was resolved on plus call arguments.
pub type MethodFn = fn(receiver: &Val, args: &[Val]) -> anyhow::Result<Val>;

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: Arc<str>,
    pub kind: Kind,
}

/// Shape of a host record: ordered typed fields and a method table.
#[derive(Debug, Clone)]
pub struct RecordType {
    name: Arc<str>,
    fields: Vec<Field>,
    methods: FastHashMap<Arc<str>, MethodFn>,
}

impl RecordType {
    pub fn new(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            fields: Vec::new(),
            methods: fast_hash_map_new(),
        }
    }

    pub fn field(mut self, name: &str, kind: Kind) -> Self {
        self.fields.push(Field {
            name: Arc::from(name),
            kind,
        });
        self
    }

    pub fn method(mut self, name: &str, func: MethodFn) -> Self {
        self.methods.insert(Arc::from(name), func);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name.as_ref() == name)
    }

    pub fn has_methods(&self) -> bool {
        !self.methods.is_empty()
    }

    pub fn find_method(&self, name: &str) -> Option<MethodFn> {
        self.methods.get(name).copied()
    }
}

// Method tables hold fn pointers, so identity is name plus field layout.
impl PartialEq for RecordType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.fields == other.fields
    }
}

/// Record instance; values are stored in field declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    ty: Arc<RecordType>,
    values: Vec<Val>,
}

impl Record {
    /// A record with every field set to its kind's zero value.
    pub fn new(ty: Arc<RecordType>) -> Self {
        let values = ty.fields.iter().map(|f| f.kind.zero()).collect();
        Self { ty, values }
    }

    pub fn set(&mut self, name: &str, value: impl Into<Val>) -> VmResult<()> {
        match self.ty.field_index(name) {
            Some(idx) => {
                self.values[idx] = value.into();
                Ok(())
            }
            None => Err(VmError::Lookup {
                op: "set",
                kind: Kind::Record(self.ty.clone()),
                key: name.to_string(),
            }),
        }
    }

    /// Builder form of [`Record::set`].
    pub fn with(mut self, name: &str, value: impl Into<Val>) -> VmResult<Self> {
        self.set(name, value)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&Val> {
        self.ty.field_index(name).map(|idx| &self.values[idx])
    }

    pub fn ty(&self) -> &Arc<RecordType> {
        &self.ty
    }

    pub fn type_name(&self) -> &str {
        self.ty.name()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Val)> {
        self.ty
            .fields
            .iter()
            .zip(self.values.iter())
            .map(|(f, v)| (f.name.as_ref(), v))
    }
}
