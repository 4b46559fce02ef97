use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::column::Column;
use crate::envelope::Record;
use crate::path::FieldPath;

/// Columns shown when there are no records to infer a schema from.
pub const DEFAULT_SCHEMA: [&str; 19] = [
    "name",
    "surname",
    "phoneNumber",
    "email",
    "address.addressLine",
    "address.city",
    "address.neighborhood",
    "address.district",
    "address.zipCode",
    "address.country",
    "customerType.name",
    "updatedTime",
    "createdTime",
    "updatedBy",
    "createdBy",
    "createadAt",
    "updatedAt",
    "isDeleted",
    "id",
];

/// Identity, name and contact fields lead, in this order, when present.
pub const PREFERRED_ORDER: [&str; 9] = [
    "id",
    "name",
    "surname",
    "phoneNumber",
    "email",
    "address.city",
    "customerType.name",
    "createdAt",
    "updatedAt",
];

/// Never shown: numeric mirror of `customerType.name`.
pub const EXCLUDED_PATHS: [&str; 1] = ["customerType.value"];

static CAMEL_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])([A-Z])").expect("static regex"));

/// Discover every leaf path across `records`.
///
/// Nested objects are walked with an extended prefix; everything else
/// (primitives, null, sequences) registers its full path once. With no
/// records the fixed [`DEFAULT_SCHEMA`] is returned as-is. Otherwise
/// [`PREFERRED_ORDER`] paths come first, then the rest in first-seen order.
/// [`EXCLUDED_PATHS`] are dropped in both cases.
pub fn build_field_paths(records: &[Record]) -> Vec<FieldPath> {
    if records.is_empty() {
        return DEFAULT_SCHEMA
            .iter()
            .filter(|p| !EXCLUDED_PATHS.contains(*p))
            .map(|p| FieldPath::parse(p))
            .collect();
    }

    let mut seen = HashSet::new();
    let mut discovered = Vec::new();
    for record in records {
        walk(record, &FieldPath::from_segments(Vec::new()), &mut seen, &mut discovered);
    }
    discovered.retain(|path: &FieldPath| !EXCLUDED_PATHS.contains(&path.dotted().as_str()));
    order_paths(discovered, &PREFERRED_ORDER)
}

fn walk(
    obj: &Record,
    prefix: &FieldPath,
    seen: &mut HashSet<FieldPath>,
    out: &mut Vec<FieldPath>,
) {
    for (key, value) in obj {
        let path = prefix.child(key);
        match value {
            Value::Object(inner) => walk(inner, &path, seen, out),
            _ => {
                if seen.insert(path.clone()) {
                    out.push(path);
                }
            }
        }
    }
}

/// Preferred paths present in `paths` first (in `preferred` order), then
/// the remaining paths in their existing order.
pub fn order_paths(paths: Vec<FieldPath>, preferred: &[&str]) -> Vec<FieldPath> {
    let mut ordered: Vec<FieldPath> = preferred
        .iter()
        .map(|p| FieldPath::parse(p))
        .filter(|p| paths.contains(p))
        .collect();
    ordered.extend(
        paths
            .into_iter()
            .filter(|p| !preferred.contains(&p.dotted().as_str())),
    );
    ordered
}

/// Ordered column descriptors for `paths`.
pub fn build_columns(paths: &[FieldPath], titles: &Titles, preferred: &[&str]) -> Vec<Column> {
    order_paths(paths.to_vec(), preferred)
        .into_iter()
        .map(|path| {
            let title = titles.resolve(&path);
            Column::new(path, title)
        })
        .collect()
}

/// Column title overrides keyed by full dot path.
#[derive(Debug, Clone, Default)]
pub struct Titles {
    overrides: HashMap<String, String>,
}

impl Titles {
    pub fn new() -> Self {
        Self::default()
    }

    /// The customer table's Turkish titles, including the API's typo'd
    /// spellings of the audit fields.
    pub fn turkish() -> Self {
        let pairs = [
            ("id", "ID"),
            ("name", "Ad"),
            ("surname", "Soyad"),
            ("phoneNumber", "Telefon"),
            ("email", "E-posta"),
            ("address.addressLine", "Adres"),
            ("address.city", "Şehir"),
            ("address.district", "İlçe"),
            ("address.neighborhood", "Mahalle"),
            ("address.zipCode", "Posta Kodu"),
            ("address.country", "Ülke"),
            ("customerType.name", "Müşteri Türü"),
            ("products", "Ürünler"),
            ("isDeleted", "Durum"),
            ("deleted", "Durum"),
            ("createdBy", "Oluşturan"),
            ("updatedBy", "Güncelleyen"),
            ("created", "Oluşturma Tarihi"),
            ("createdAt", "Oluşturma Tarihi"),
            ("createadAt", "Oluşturma Tarihi"),
            ("createdDate", "Oluşturma Tarihi"),
            ("updated", "Güncelleme Tarihi"),
            ("updatedAt", "Güncelleme Tarihi"),
            ("updatedDate", "Güncelleme Tarihi"),
            ("createdTime", "Oluşturma Saati"),
            ("createadTime", "Oluşturma Saati"),
            ("cratedTime", "Oluşturma Saati"),
            ("updatedTime", "Güncelleme Saati"),
        ];
        let mut titles = Titles::new();
        for (path, title) in pairs {
            titles.insert(path, title);
        }
        titles
    }

    pub fn insert(&mut self, path: impl Into<String>, title: impl Into<String>) {
        self.overrides.insert(path.into(), title.into());
    }

    /// Exact override for the full dot path, else [`humanize`].
    pub fn resolve(&self, path: &FieldPath) -> String {
        match self.overrides.get(&path.dotted()) {
            Some(title) => title.clone(),
            None => humanize(path),
        }
    }
}

/// `phoneNumber` → `Phone Number`, `address.zipCode` → `Address · zip Code`.
pub fn humanize(path: &FieldPath) -> String {
    let joined = path.segments().join(" · ");
    let spaced = CAMEL_BOUNDARY.replace_all(&joined, "$1 $2");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
