//! Display glyphs, plain ASCII or Unicode.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyphs {
    /// Shown instead of a residue identical to the master.
    pub master_match: &'static str,
    /// Unlabelled ruler columns, when filler is enabled.
    pub ruler_filler: &'static str,
    pub h_separator: &'static str,
    pub arrow_left: &'static str,
    pub arrow_right: &'static str,
}

pub fn select(fancy_requested: bool) -> Glyphs {
    if fancy_requested {
        fancy()
    } else {
        ascii()
    }
}

fn ascii() -> Glyphs {
    Glyphs {
        master_match: ".",
        ruler_filler: ".",
        h_separator: "-",
        arrow_left: "<",
        arrow_right: ">",
    }
}

fn fancy() -> Glyphs {
    Glyphs {
        master_match: "\u{b7}",
        ruler_filler: "\u{2219}",
        h_separator: "\u{2500}",
        arrow_left: "\u{2190}",
        arrow_right: "\u{2192}",
    }
}
