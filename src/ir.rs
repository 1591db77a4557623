// Structural type algebra: what inference produces and what the query planner consumes.

use std::fmt;

use serde_json::{Value, json};

#[derive(Clone, Debug, PartialEq)]
pub enum StructuralType {
    Null,
    Boolean,
    Integer,
    Long,
    Double,
    String,
    Binary,
    Date,
    Timestamp,
    Array(ArrayType),
    Struct(StructType),
    /// no consistent type could be determined; absorbing for merges except against `Skip`
    Conflict,
    /// nothing observed (e.g. an empty array); identity for merges
    Skip,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArrayType {
    pub element: Box<StructuralType>,
    pub contains_null: bool,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct StructType {
    fields: Vec<StructField>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StructField {
    pub name: String,
    pub data_type: StructuralType,
    pub nullable: bool,
}

impl StructuralType {
    pub fn array(element: StructuralType, contains_null: bool) -> Self {
        StructuralType::Array(ArrayType::new(element, contains_null))
    }

    pub fn empty_struct() -> Self {
        StructuralType::Struct(StructType::empty())
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, StructuralType::Integer | StructuralType::Long | StructuralType::Double)
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self, StructuralType::Conflict | StructuralType::Skip)
    }

    /// True if `Conflict` appears anywhere in this type.
    pub fn has_conflict(&self) -> bool {
        match self {
            StructuralType::Conflict => true,
            StructuralType::Array(a) => a.element.has_conflict(),
            StructuralType::Struct(s) => s.fields().iter().any(|f| f.data_type.has_conflict()),
            _ => false,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            StructuralType::Null => "null",
            StructuralType::Boolean => "boolean",
            StructuralType::Integer => "integer",
            StructuralType::Long => "long",
            StructuralType::Double => "double",
            StructuralType::String => "string",
            StructuralType::Binary => "binary",
            StructuralType::Date => "date",
            StructuralType::Timestamp => "timestamp",
            StructuralType::Array(_) => "array",
            StructuralType::Struct(_) => "struct",
            StructuralType::Conflict => "conflict",
            StructuralType::Skip => "skip",
        }
    }

    /// Query-engine JSON form: leaves are bare names, containers are objects.
    pub fn to_json(&self) -> Value {
        match self {
            StructuralType::Array(a) => json!({
                "type": "array",
                "elementType": a.element.to_json(),
                "containsNull": a.contains_null,
            }),
            StructuralType::Struct(s) => s.to_json(),
            leaf => Value::from(leaf.type_name()),
        }
    }
}

impl ArrayType {
    pub fn new(element: StructuralType, contains_null: bool) -> Self {
        Self { element: Box::new(element), contains_null }
    }
}

impl StructType {
    /// Fields are taken in the given order; callers keep names unique.
    pub fn new(fields: Vec<StructField>) -> Self {
        Self { fields }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &[StructField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&StructField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn to_json(&self) -> Value {
        let fields = self
            .fields
            .iter()
            .map(|f| {
                json!({
                    "name": f.name,
                    "type": f.data_type.to_json(),
                    "nullable": f.nullable,
                    "metadata": {},
                })
            })
            .collect::<Vec<_>>();
        json!({ "type": "struct", "fields": fields })
    }

    /// Indented tree view:
    ///
    /// ```text
    /// root
    ///  |-- a: double (nullable = true)
    ///  |-- tags: array (nullable = true)
    ///  |    |-- element: string (containsNull = true)
    /// ```
    pub fn tree_string(&self) -> String {
        self.tree_string_with(|ty| ty.type_name().to_string())
    }

    /// Same as [`tree_string`](Self::tree_string) with a custom label per type.
    pub fn tree_string_with(&self, label: impl Fn(&StructuralType) -> String) -> String {
        let mut out = String::from("root\n");
        write_fields(&mut out, self, " |", &label);
        out
    }
}

impl StructField {
    pub fn new(name: impl Into<String>, data_type: StructuralType, nullable: bool) -> Self {
        Self { name: name.into(), data_type, nullable }
    }
}

fn write_fields(out: &mut String, s: &StructType, prefix: &str, label: &dyn Fn(&StructuralType) -> String) {
    for f in s.fields() {
        out.push_str(&format!(
            "{prefix}-- {}: {} (nullable = {})\n",
            f.name,
            label(&f.data_type),
            f.nullable
        ));
        write_nested(out, &f.data_type, &format!("{prefix}    |"), label);
    }
}

fn write_nested(out: &mut String, ty: &StructuralType, prefix: &str, label: &dyn Fn(&StructuralType) -> String) {
    match ty {
        StructuralType::Struct(s) => write_fields(out, s, prefix, label),
        StructuralType::Array(a) => {
            out.push_str(&format!(
                "{prefix}-- element: {} (containsNull = {})\n",
                label(&a.element),
                a.contains_null
            ));
            write_nested(out, &a.element, &format!("{prefix}    |"), label);
        }
        _ => {}
    }
}

impl fmt::Display for StructuralType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructuralType::Array(a) => write!(f, "array<{}>", a.element),
            StructuralType::Struct(s) => write!(f, "{s}"),
            leaf => f.write_str(leaf.type_name()),
        }
    }
}

impl fmt::Display for StructType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("struct<")?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}:{}", field.name, field.data_type)?;
        }
        f.write_str(">")
    }
}
