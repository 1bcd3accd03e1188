//! Markup delimiter symbols
//!
//! Tags are delimited by `<` and `>`, entity references by `&` and `;`.

/// A pair of matching delimiters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolPair {
    pub opening: char,
    pub closing: char,
}

impl SymbolPair {
    pub const TAG: SymbolPair = SymbolPair { opening: '<', closing: '>' };
    pub const ENTITY: SymbolPair = SymbolPair { opening: '&', closing: ';' };
}

/// One of the four delimiter symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    TagOpen,
    TagClose,
    EntityOpen,
    EntityClose,
}

impl Symbol {
    /// Dispatch order when an edit touches several symbols: tags before
    /// entities, opening before closing.
    pub const PRIORITY: [Symbol; 4] = [
        Symbol::TagOpen,
        Symbol::TagClose,
        Symbol::EntityOpen,
        Symbol::EntityClose,
    ];

    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '<' => Some(Symbol::TagOpen),
            '>' => Some(Symbol::TagClose),
            '&' => Some(Symbol::EntityOpen),
            ';' => Some(Symbol::EntityClose),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Symbol::TagOpen => '<',
            Symbol::TagClose => '>',
            Symbol::EntityOpen => '&',
            Symbol::EntityClose => ';',
        }
    }

    /// The symbol on the other side of this symbol's pair
    pub fn matching(self) -> Self {
        match self {
            Symbol::TagOpen => Symbol::TagClose,
            Symbol::TagClose => Symbol::TagOpen,
            Symbol::EntityOpen => Symbol::EntityClose,
            Symbol::EntityClose => Symbol::EntityOpen,
        }
    }

    pub fn pair(self) -> SymbolPair {
        match self {
            Symbol::TagOpen | Symbol::TagClose => SymbolPair::TAG,
            Symbol::EntityOpen | Symbol::EntityClose => SymbolPair::ENTITY,
        }
    }

    pub fn is_opening(self) -> bool {
        matches!(self, Symbol::TagOpen | Symbol::EntityOpen)
    }

    fn slot(self) -> usize {
        match self {
            Symbol::TagOpen => 0,
            Symbol::TagClose => 1,
            Symbol::EntityOpen => 2,
            Symbol::EntityClose => 3,
        }
    }
}

/// Matching delimiter for `symbol`, `None` for anything that is not a delimiter
pub fn match_of(symbol: char) -> Option<char> {
    Symbol::from_char(symbol).map(|s| s.matching().as_char())
}

/// First and last byte index of a symbol inside a scanned string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    pub first: usize,
    pub last: usize,
}

/// Where each delimiter symbol occurs in a delta, collected in one pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolScan {
    found: [Option<Occurrence>; 4],
}

impl SymbolScan {
    pub fn of(text: &str) -> Self {
        let mut scan = Self::default();
        for (idx, ch) in text.char_indices() {
            let Some(symbol) = Symbol::from_char(ch) else {
                continue;
            };
            scan.found[symbol.slot()]
                .get_or_insert(Occurrence {
                    first: idx,
                    last: idx,
                })
                .last = idx;
        }
        scan
    }

    pub fn get(&self, symbol: Symbol) -> Option<Occurrence> {
        self.found[symbol.slot()]
    }

    /// The highest priority symbol present, with its occurrence
    pub fn dominant(&self) -> Option<(Symbol, Occurrence)> {
        Symbol::PRIORITY
            .iter()
            .find_map(|&symbol| self.get(symbol).map(|occurrence| (symbol, occurrence)))
    }

    /// True when no delimiter symbol was seen
    pub fn is_interior(&self) -> bool {
        self.found.iter().all(Option::is_none)
    }
}
