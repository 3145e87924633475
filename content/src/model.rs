use serde_json::{Map, Value};

/// The content kinds served by the admin CMS. Every kind shares the same
/// list/create/delete lifecycle; the descriptor carries what differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Video,
    Website,
    Model3d,
    BlogPost,
}

/// Per-kind storage and validation descriptor:
/// PK = partition, SK = "{item_prefix}{uuid}"
pub struct KindDescriptor {
    pub partition: &'static str,
    pub item_prefix: &'static str,
    pub label: &'static str,
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
}

const VIDEO: KindDescriptor = KindDescriptor {
    partition: "VIDEO",
    item_prefix: "VIDEO#",
    label: "Video",
    required: &[
        "title",
        "category",
        "description",
        "duration",
        "videoUrl",
        "thumbnail",
        "client",
        "tags",
    ],
    optional: &[],
};

const WEBSITE: KindDescriptor = KindDescriptor {
    partition: "WEBSITE",
    item_prefix: "WEBSITE#",
    label: "Website",
    required: &[
        "title",
        "categories",
        "type",
        "duration",
        "thumbnail",
        "liveUrl",
        "githubUrl",
        "description",
        "client",
    ],
    optional: &["tags", "features"],
};

const MODEL3D: KindDescriptor = KindDescriptor {
    partition: "MODEL3D",
    item_prefix: "MODEL3D#",
    label: "3D model",
    required: &[
        "title",
        "category",
        "description",
        "thumbnail",
        "modelUrl",
        "client",
        "tags",
    ],
    optional: &[],
};

// Blog posts are validated through the typed payload in blog.rs, so the
// descriptor only carries storage coordinates.
const BLOG_POST: KindDescriptor = KindDescriptor {
    partition: "BLOG",
    item_prefix: "BLOG#",
    label: "Blog post",
    required: &["hero", "metadata", "content"],
    optional: &["verified"],
};

impl ContentKind {
    pub fn descriptor(self) -> &'static KindDescriptor {
        match self {
            ContentKind::Video => &VIDEO,
            ContentKind::Website => &WEBSITE,
            ContentKind::Model3d => &MODEL3D,
            ContentKind::BlogPost => &BLOG_POST,
        }
    }

    /// Map the admin route segment (/api/admin/{segment}) to a kind.
    pub fn from_route(segment: &str) -> Option<Self> {
        match segment {
            "video" => Some(ContentKind::Video),
            "web" => Some(ContentKind::Website),
            "model" => Some(ContentKind::Model3d),
            "blog" => Some(ContentKind::BlogPost),
            _ => None,
        }
    }
}

/// A stored content document: identifier, server-maintained timestamps, and
/// the kind-specific fields as a JSON object.
#[derive(Debug, Clone)]
pub struct ContentItem {
    pub id: String,
    pub created_at: String,
    pub updated_at: String,
    pub fields: Map<String, Value>,
}

impl ContentItem {
    /// Flatten into the API document shape.
    pub fn into_json(self) -> Value {
        let mut doc = self.fields;
        doc.insert("id".to_string(), Value::String(self.id));
        doc.insert("createdAt".to_string(), Value::String(self.created_at));
        doc.insert("updatedAt".to_string(), Value::String(self.updated_at));
        Value::Object(doc)
    }
}

/// Required fields that are absent or empty in the payload. A field counts
/// as missing when it is absent, null, an empty string, or an empty array.
pub fn missing_required_fields(
    descriptor: &KindDescriptor,
    payload: &Map<String, Value>,
) -> Vec<&'static str> {
    descriptor
        .required
        .iter()
        .filter(|name| {
            match payload.get(**name) {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.trim().is_empty(),
                Some(Value::Array(a)) => a.is_empty(),
                Some(_) => false,
            }
        })
        .copied()
        .collect()
}
