#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum HighlightKind {
    Comment = 0,
    String = 1,
    Keyword = 2,
    Type = 3,
    Number = 4,
    Attribute = 5,
    Lifetime = 6,
    Function = 7,
    Macro = 8,
    Variable = 9,
    Constant = 10,
    Tag = 11,
    Property = 12,
    Operator = 13,
}

impl HighlightKind {
    pub const COUNT: usize = 14;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Comment,
        Self::String,
        Self::Keyword,
        Self::Type,
        Self::Number,
        Self::Attribute,
        Self::Lifetime,
        Self::Function,
        Self::Macro,
        Self::Variable,
        Self::Constant,
        Self::Tag,
        Self::Property,
        Self::Operator,
    ];

    pub const fn tag(self) -> u16 {
        self as u16
    }

    pub fn from_tag(tag: u16) -> Option<Self> {
        Self::ALL.get(tag as usize).copied()
    }

    /// Tree traversal should skip the node's children when a highlight kind is a "leaf".
    pub const fn is_leaf(self) -> bool {
        matches!(self, Self::Comment | Self::String | Self::Attribute)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::String => "string",
            Self::Keyword => "keyword",
            Self::Type => "type",
            Self::Number => "number",
            Self::Attribute => "attribute",
            Self::Lifetime => "lifetime",
            Self::Function => "function",
            Self::Macro => "macro",
            Self::Variable => "variable",
            Self::Constant => "constant",
            Self::Tag => "tag",
            Self::Property => "property",
            Self::Operator => "operator",
        }
    }
}

const _: () = assert!(HighlightKind::Operator as usize == HighlightKind::COUNT - 1);
