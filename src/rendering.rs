//! Rendering targets and the text writer chosen for each.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Markup flavour the response will be rendered in.
///
/// Known values keep dispatch exhaustive; `Other` carries anything an
/// upstream layer set that this crate does not recognize.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum RenderingType {
    #[default]
    Html4,
    Html32,
    Html5,
    XhtmlMp,
    XhtmlBasic,
    Chtml10,
    Other(String),
}

impl RenderingType {
    pub fn as_str(&self) -> &str {
        match self {
            RenderingType::Html4 => "html4",
            RenderingType::Html32 => "html32",
            RenderingType::Html5 => "html5",
            RenderingType::XhtmlMp => "xhtml-mp",
            RenderingType::XhtmlBasic => "xhtml-basic",
            RenderingType::Chtml10 => "chtml10",
            RenderingType::Other(value) => value.as_str(),
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "html4" => RenderingType::Html4,
            "html32" => RenderingType::Html32,
            "html5" => RenderingType::Html5,
            "xhtml-mp" => RenderingType::XhtmlMp,
            "xhtml-basic" => RenderingType::XhtmlBasic,
            "chtml10" => RenderingType::Chtml10,
            other => RenderingType::Other(other.to_string()),
        }
    }

    /// MIME type served alongside this rendering type by default.
    pub fn default_mime(&self) -> &'static str {
        "text/html"
    }
}

impl Serialize for RenderingType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RenderingType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse(&value))
    }
}

/// Text writer used to emit markup for a rendering type.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TagWriter {
    Xhtml,
    Chtml,
    Html,
    Html32,
}

impl TagWriter {
    /// Select the writer for the final `preferredRenderingType`.
    ///
    /// Absent and unrecognized values fall through to [`TagWriter::Html32`].
    pub fn for_rendering(rendering: Option<&RenderingType>) -> Self {
        match rendering {
            Some(RenderingType::XhtmlMp | RenderingType::XhtmlBasic) => TagWriter::Xhtml,
            Some(RenderingType::Chtml10) => TagWriter::Chtml,
            Some(RenderingType::Html4) => TagWriter::Html,
            Some(RenderingType::Html32) => TagWriter::Html32,
            Some(RenderingType::Html5 | RenderingType::Other(_)) | None => TagWriter::Html32,
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            TagWriter::Xhtml => "System.Web.UI.XhtmlTextWriter",
            TagWriter::Chtml => "System.Web.UI.ChtmlTextWriter",
            TagWriter::Html => "System.Web.UI.HtmlTextWriter",
            TagWriter::Html32 => "System.Web.UI.Html32TextWriter",
        }
    }
}
