//! Test fixtures and PDF builders.
//!
//! Documents are assembled with `lopdf` so that encryption can be applied
//! with a chosen user and owner password.

use anyhow::Result;
use lopdf::{
    dictionary, Document, EncryptionState, EncryptionVersion, Object, Permissions, Stream,
    StringFormat,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Builder for creating test PDFs with one text line per page.
///
/// # Example
///
/// ```no_run
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// let path = TestPdfBuilder::new()
///     .with_pages(3)
///     .encrypted()
///     .build(Path::new("/tmp/encrypted.pdf"))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TestPdfBuilder {
    pages: Vec<String>,
    user_password: Option<String>,
    owner_password: String,
    title: Option<String>,
    inherited_attributes: bool,
}

impl TestPdfBuilder {
    /// Creates a builder for an unencrypted document with no pages.
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            user_password: None,
            owner_password: "owner-secret".to_string(),
            title: None,
            inherited_attributes: false,
        }
    }

    /// Adds a page showing `text`.
    pub fn with_page(mut self, text: &str) -> Self {
        self.pages.push(text.to_string());
        self
    }

    /// Adds `count` pages labelled "Page i of count".
    pub fn with_pages(mut self, count: usize) -> Self {
        for i in 1..=count {
            self.pages.push(page_label(i, count));
        }
        self
    }

    /// Encrypts with an empty user password (permissions set by the owner password).
    pub fn encrypted(self) -> Self {
        self.with_user_password("")
    }

    /// Encrypts with the given user password.
    pub fn with_user_password(mut self, password: &str) -> Self {
        self.user_password = Some(password.to_string());
        self
    }

    /// Sets the owner password used when encrypting.
    pub fn with_owner_password(mut self, password: &str) -> Self {
        self.owner_password = password.to_string();
        self
    }

    /// Sets the `Title` entry of the document information dictionary.
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Places `Resources` and `MediaBox` on the `Pages` node instead of each page.
    pub fn with_inherited_attributes(mut self) -> Self {
        self.inherited_attributes = true;
        self
    }

    /// Assembles the document in memory.
    pub fn to_document(&self) -> Result<Document> {
        let mut doc = Document::with_version("1.5");
        doc.trailer.set(
            "ID",
            Object::Array(vec![
                Object::String(vec![7u8; 16], StringFormat::Literal),
                Object::String(vec![9u8; 16], StringFormat::Literal),
            ]),
        );

        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica"
        });
        let resources = dictionary! {
            "Font" => dictionary! { "F1" => Object::Reference(font_id) }
        };

        let mut kids = Vec::new();
        for text in &self.pages {
            let content = format!("BT\n/F1 12 Tf\n72 720 Td\n({}) Tj\nET\n", text);
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

            let mut page = dictionary! {
                "Type" => "Page",
                "Parent" => Object::Reference(pages_id),
                "Contents" => Object::Reference(content_id)
            };
            if !self.inherited_attributes {
                page.set("Resources", resources.clone());
                page.set("MediaBox", media_box());
            }
            kids.push(Object::Reference(doc.add_object(page)));
        }

        let mut pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => self.pages.len() as i64
        };
        if self.inherited_attributes {
            pages.set("Resources", resources);
            pages.set("MediaBox", media_box());
        }
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id)
        });
        doc.trailer.set("Root", Object::Reference(catalog_id));

        if let Some(title) = &self.title {
            let info_id = doc.add_object(dictionary! {
                "Title" => Object::string_literal(title.as_str())
            });
            doc.trailer.set("Info", Object::Reference(info_id));
        }

        if let Some(user_password) = &self.user_password {
            let version = EncryptionVersion::V2 {
                document: &doc,
                owner_password: self.owner_password.as_str(),
                user_password: user_password.as_str(),
                key_length: 128,
                permissions: Permissions::all(),
            };
            let state = EncryptionState::try_from(version)?;
            doc.encrypt(&state)?;
        }

        Ok(doc)
    }

    /// Serializes the document.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.to_document()?.save_to(&mut bytes)?;
        Ok(bytes)
    }

    /// Builds the PDF and writes it to the specified path.
    pub fn build(&self, output_path: &Path) -> Result<PathBuf> {
        fs::write(output_path, self.to_bytes()?)?;
        Ok(output_path.to_path_buf())
    }
}

impl Default for TestPdfBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Text shown on page `i` of a document built with [`TestPdfBuilder::with_pages`].
pub fn page_label(i: usize, count: usize) -> String {
    format!("Page {} of {}", i, count)
}

fn media_box() -> Vec<Object> {
    vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(612),
        Object::Integer(792),
    ]
}

/// Scratch layout with an input directory and a not-yet-created output directory.
pub struct Workspace {
    pub temp_dir: TempDir,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Workspace {
    /// Creates `data/` inside a fresh temporary directory.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let input_dir = temp_dir.path().join("data");
        let output_dir = temp_dir.path().join("processed");
        fs::create_dir(&input_dir)?;
        Ok(Self {
            temp_dir,
            input_dir,
            output_dir,
        })
    }

    /// Writes a fixture into the input directory.
    pub fn add(&self, name: &str, builder: TestPdfBuilder) -> Result<PathBuf> {
        builder.build(&self.input_dir.join(name))
    }

    /// Writes arbitrary bytes into the input directory.
    pub fn add_raw(&self, name: &str, contents: &[u8]) -> Result<PathBuf> {
        let path = self.input_dir.join(name);
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Path of the copy for `name` in the output directory.
    pub fn output(&self, name: &str) -> PathBuf {
        self.output_dir.join(name)
    }
}

/// Creates the two-file scenario: `a.pdf` plain with 3 pages and `b.pdf`
/// encrypted with an empty user password and 2 pages.
pub fn create_mixed_batch(workspace: &Workspace) -> Result<()> {
    workspace.add("a.pdf", TestPdfBuilder::new().with_pages(3))?;
    workspace.add("b.pdf", TestPdfBuilder::new().with_pages(2).encrypted())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_pattern() {
        let builder = TestPdfBuilder::new()
            .with_pages(2)
            .with_page("extra")
            .with_user_password("secret");

        assert_eq!(builder.pages.len(), 3);
        assert_eq!(builder.pages[0], "Page 1 of 2");
        assert_eq!(builder.user_password.as_deref(), Some("secret"));
    }

    #[test]
    fn test_plain_fixture_loads() -> Result<()> {
        let doc = Document::load_mem(&TestPdfBuilder::new().with_pages(4).to_bytes()?)?;
        assert_eq!(doc.get_pages().len(), 4);
        assert!(!doc.is_encrypted());
        Ok(())
    }
}
