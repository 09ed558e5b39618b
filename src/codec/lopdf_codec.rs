//! Codec backed by `lopdf`.
//!
//! `lopdf` already decrypts documents protected only by an empty user password
//! while loading them, leaving the `Encrypt` entry in the trailer. Only a
//! document that loading could not unlock gets an explicit decryption attempt
//! with the caller's password.

use super::{CodecError, CodecResult, PdfCodec, SecurityInfo, UnprotectedPdf};

use lopdf::{dictionary, Dictionary, Document, Object, ObjectId};
use tracing::debug;

/// Page attributes that may be inherited from an ancestor `Pages` node.
const INHERITABLE_PAGE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Upper bound on `Parent` hops, guards against cyclic page trees.
const MAX_TREE_DEPTH: usize = 64;

/// Strips encryption by loading with `lopdf` and rebuilding the page tree.
///
/// The rebuilt document gets a fresh catalog and a flat `Pages` node holding
/// every page of the source in order, plus the source's `Info` dictionary.
/// Objects no longer reachable from the new trailer, including the old
/// encryption dictionary, are pruned.
#[derive(Debug, Clone, Default)]
pub struct LopdfCodec;

impl LopdfCodec {
    pub fn new() -> Self {
        Self
    }

    fn open(&self, source: &[u8]) -> CodecResult<Document> {
        Document::load_mem(source).map_err(|e| CodecError::Parse(e.to_string()))
    }

    /// Decrypts the document in place if needed.
    ///
    /// Returns whether the source was encrypted.
    fn unlock(&self, document: &mut Document, password: &str) -> CodecResult<bool> {
        if document.encryption_state.is_some() {
            // Decrypted during load; decrypting again would scramble every
            // string and stream. The stale `Encrypt` entry dies with the trailer.
            return Ok(true);
        }

        if !document.is_encrypted() {
            return Ok(false);
        }

        document
            .decrypt(password)
            .map_err(|e| CodecError::Decrypt(e.to_string()))?;

        if document.encryption_state.is_none() && document.is_encrypted() {
            return Err(CodecError::Decrypt(
                "document still encrypted after decryption".to_string(),
            ));
        }

        Ok(true)
    }

    /// Moves every page of `source` into a new, unencrypted document.
    fn rebuild(&self, mut source: Document) -> CodecResult<Document> {
        let page_ids: Vec<ObjectId> = source.get_pages().into_values().collect();

        for &page_id in &page_ids {
            materialize_inherited(&mut source, page_id)?;
        }

        let info = source.trailer.get(b"Info").ok().cloned();

        let mut output = Document::with_version(source.version.clone());
        output.objects = std::mem::take(&mut source.objects);
        output.max_id = source.max_id;

        let pages_id = output.new_object_id();
        for &page_id in &page_ids {
            let page = output
                .get_object_mut(page_id)
                .and_then(Object::as_dict_mut)
                .map_err(|e| CodecError::Parse(format!("page {:?}: {}", page_id, e)))?;
            page.set("Parent", Object::Reference(pages_id));
        }

        let kids: Vec<Object> = page_ids.iter().copied().map(Object::Reference).collect();
        output.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_ids.len() as i64
            }),
        );

        let catalog_id = output.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id)
        });
        output.trailer.set("Root", Object::Reference(catalog_id));
        if let Some(info) = info {
            output.trailer.set("Info", info);
        }

        let pruned = output.prune_objects();
        debug!(
            pages = page_ids.len(),
            pruned = pruned.len(),
            "rebuilt page tree"
        );

        Ok(output)
    }

    fn serialize(&self, document: &mut Document) -> CodecResult<Vec<u8>> {
        let mut bytes = Vec::new();
        document
            .save_to(&mut bytes)
            .map_err(|e| CodecError::Serialize(e.to_string()))?;
        Ok(bytes)
    }
}

impl PdfCodec for LopdfCodec {
    fn strip(&self, source: &[u8], password: &str) -> CodecResult<UnprotectedPdf> {
        let mut document = self.open(source)?;
        let was_encrypted = self.unlock(&mut document, password)?;

        let mut rebuilt = self.rebuild(document)?;
        let page_count = rebuilt.get_pages().len();
        let bytes = self.serialize(&mut rebuilt)?;

        Ok(UnprotectedPdf {
            bytes,
            page_count,
            was_encrypted,
        })
    }

    fn inspect(&self, source: &[u8], password: &str) -> CodecResult<SecurityInfo> {
        let mut document = self.open(source)?;
        let (encrypted, unlocked) = match self.unlock(&mut document, password) {
            Ok(was_encrypted) => (was_encrypted, true),
            Err(_) => (true, false),
        };

        Ok(SecurityInfo {
            encrypted,
            unlocked,
            page_count: unlocked.then(|| document.get_pages().len()),
        })
    }

    fn name(&self) -> &str {
        "lopdf"
    }
}

/// Copies inheritable attributes from ancestor nodes onto the page itself.
///
/// The rebuilt tree has a single `Pages` node, so anything a page used to
/// inherit from an intermediate node would otherwise be lost.
fn materialize_inherited(document: &mut Document, page_id: ObjectId) -> CodecResult<()> {
    let page = document
        .get_dictionary(page_id)
        .map_err(|e| CodecError::Parse(format!("page {:?}: {}", page_id, e)))?;

    let inherited: Vec<(&[u8], Object)> = INHERITABLE_PAGE_KEYS
        .into_iter()
        .filter(|key| !page.has(key))
        .filter_map(|key| inherited_value(document, page, key).map(|value| (key, value)))
        .collect();

    if inherited.is_empty() {
        return Ok(());
    }

    let page = document
        .get_dictionary_mut(page_id)
        .map_err(|e| CodecError::Parse(format!("page {:?}: {}", page_id, e)))?;
    for (key, value) in inherited {
        page.set(key, value);
    }

    Ok(())
}

fn inherited_value(document: &Document, page: &Dictionary, key: &[u8]) -> Option<Object> {
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();

    for _ in 0..MAX_TREE_DEPTH {
        let node = document.get_dictionary(parent?).ok()?;
        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    None
}
