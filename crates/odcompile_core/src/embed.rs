//! Platform-neutral reply model.
//!
//! Results are rendered into a [`ResultEmbed`] here and converted to the
//! chat platform's own embed type at the edge.

use derive_getters::Getters;

/// Maximum characters in a single embed field value.
pub const EMBED_FIELD_LIMIT: usize = 1024;

/// Maximum characters in an embed description.
pub const EMBED_DESCRIPTION_LIMIT: usize = 4096;

const TRUNCATION_MARKER: &str = "… (truncated)";
const CODE_BLOCK_OVERHEAD: usize = "```\n\n```".len();

/// Accent colour of a result embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum EmbedColour {
    /// Compiled and ran.
    #[display("success")]
    Success,
    /// Compiled, but produced nothing to show.
    #[display("warning")]
    Warning,
    /// Compile failure or unreachable listener.
    #[display("failure")]
    Failure,
}

impl EmbedColour {
    /// RGB value for the colour.
    pub fn rgb(self) -> u32 {
        match self {
            Self::Success => 0x2ECC71,
            Self::Warning => 0xF1C40F,
            Self::Failure => 0xE74C3C,
        }
    }
}

/// A named embed section.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct EmbedField {
    name: String,
    value: String,
    inline: bool,
}

/// Structured result message.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ResultEmbed {
    title: String,
    description: Option<String>,
    colour: EmbedColour,
    fields: Vec<EmbedField>,
    footer: Option<String>,
}

impl ResultEmbed {
    /// Create an embed with a title and colour.
    pub fn new(title: impl Into<String>, colour: EmbedColour) -> Self {
        Self {
            title: title.into(),
            description: None,
            colour,
            fields: Vec::new(),
            footer: None,
        }
    }

    /// Set the description, clipped to the description limit.
    pub fn with_description(mut self, description: impl AsRef<str>) -> Self {
        self.description = Some(clip(description.as_ref(), EMBED_DESCRIPTION_LIMIT));
        self
    }

    /// Append a field, clipping its value to the field limit.
    pub fn with_field(
        mut self,
        name: impl Into<String>,
        value: impl AsRef<str>,
        inline: bool,
    ) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: clip(value.as_ref(), EMBED_FIELD_LIMIT),
            inline,
        });
        self
    }

    /// Set the footer text.
    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&EmbedField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Render as plain text for terminals and fallback messages.
    pub fn to_plain_text(&self) -> String {
        let mut out = format!("**{}**", self.title);
        if let Some(description) = &self.description {
            out.push('\n');
            out.push_str(description);
        }
        for field in &self.fields {
            out.push_str(&format!("\n__{}__\n{}", field.name, field.value));
        }
        if let Some(footer) = &self.footer {
            out.push_str(&format!("\n_{}_", footer));
        }
        out
    }
}

/// A message the bot sends back to the chat.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::From)]
pub enum Reply {
    /// Plain text message.
    Text(String),
    /// Structured embed.
    Embed(ResultEmbed),
}

impl Reply {
    /// Convenience constructor for text replies.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

/// Clip text to at most `max` characters, marking the cut.
///
/// # Examples
///
/// ```
/// use odcompile_core::clip;
///
/// assert_eq!(clip("short", 10), "short");
/// let clipped = clip(&"x".repeat(100), 20);
/// assert_eq!(clipped.chars().count(), 20);
/// assert!(clipped.ends_with("(truncated)"));
/// ```
pub fn clip(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(TRUNCATION_MARKER.chars().count());
    let mut clipped: String = text.chars().take(keep).collect();
    clipped.push_str(TRUNCATION_MARKER);
    clipped
}

/// Wrap text in a code block whose total length fits within `max`.
pub fn code_block(text: &str, max: usize) -> String {
    let escaped = text.trim_end().replace("```", "`\u{200b}``");
    let body = clip(&escaped, max.saturating_sub(CODE_BLOCK_OVERHEAD));
    format!("```\n{}\n```", body)
}
