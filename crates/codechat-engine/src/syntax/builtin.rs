use super::{BlockDelimiters, CommentSyntax};

/// One row of the built-in language table.
pub struct BuiltinLanguage {
    pub id: &'static str,
    pub extensions: &'static [&'static str],
    pub inline: &'static [&'static str],
    pub block: &'static [(&'static str, &'static str)],
}

impl BuiltinLanguage {
    pub fn syntax(&self) -> CommentSyntax {
        CommentSyntax::new(
            self.inline.iter().copied(),
            self.block
                .iter()
                .map(|(open, close)| BlockDelimiters::new(*open, *close)),
        )
    }
}

const C_BLOCK: &[(&str, &str)] = &[("/*", "*/")];

pub const BUILTIN_LANGUAGES: &[BuiltinLanguage] = &[
    BuiltinLanguage {
        id: "c",
        extensions: &["c", "h"],
        inline: &["//"],
        block: C_BLOCK,
    },
    BuiltinLanguage {
        id: "cpp",
        extensions: &["cc", "cpp", "cxx", "hh", "hpp", "hxx"],
        inline: &["//"],
        block: C_BLOCK,
    },
    BuiltinLanguage {
        id: "csharp",
        extensions: &["cs"],
        inline: &["//"],
        block: C_BLOCK,
    },
    BuiltinLanguage {
        id: "css",
        extensions: &["css"],
        inline: &[],
        block: C_BLOCK,
    },
    BuiltinLanguage {
        id: "go",
        extensions: &["go"],
        inline: &["//"],
        block: C_BLOCK,
    },
    BuiltinLanguage {
        id: "haskell",
        extensions: &["hs"],
        inline: &["--"],
        block: &[("{-", "-}")],
    },
    BuiltinLanguage {
        id: "html",
        extensions: &["htm", "html", "xml", "svg"],
        inline: &[],
        block: &[("<!--", "-->")],
    },
    BuiltinLanguage {
        id: "java",
        extensions: &["java"],
        inline: &["//"],
        block: C_BLOCK,
    },
    BuiltinLanguage {
        id: "javascript",
        extensions: &["js", "jsx", "mjs", "cjs"],
        inline: &["//"],
        block: C_BLOCK,
    },
    BuiltinLanguage {
        id: "kotlin",
        extensions: &["kt", "kts"],
        inline: &["//"],
        block: C_BLOCK,
    },
    BuiltinLanguage {
        id: "lua",
        extensions: &["lua"],
        inline: &["--"],
        block: &[("--[[", "]]")],
    },
    BuiltinLanguage {
        id: "matlab",
        extensions: &["m"],
        inline: &["%"],
        block: &[("%{", "%}")],
    },
    BuiltinLanguage {
        id: "python",
        extensions: &["py", "pyw"],
        inline: &["#"],
        block: &[],
    },
    BuiltinLanguage {
        id: "rust",
        extensions: &["rs"],
        inline: &["//"],
        block: C_BLOCK,
    },
    BuiltinLanguage {
        id: "shell",
        extensions: &["sh", "bash", "zsh"],
        inline: &["#"],
        block: &[],
    },
    BuiltinLanguage {
        id: "sql",
        extensions: &["sql"],
        inline: &["--"],
        block: C_BLOCK,
    },
    BuiltinLanguage {
        id: "swift",
        extensions: &["swift"],
        inline: &["//"],
        block: C_BLOCK,
    },
    BuiltinLanguage {
        id: "toml",
        extensions: &["toml"],
        inline: &["#"],
        block: &[],
    },
    BuiltinLanguage {
        id: "typescript",
        extensions: &["ts", "tsx", "mts", "cts"],
        inline: &["//"],
        block: C_BLOCK,
    },
    BuiltinLanguage {
        id: "verilog",
        extensions: &["v", "sv", "svh"],
        inline: &["//"],
        block: C_BLOCK,
    },
    BuiltinLanguage {
        id: "vhdl",
        extensions: &["vhd", "vhdl"],
        inline: &["--"],
        block: &[],
    },
    BuiltinLanguage {
        id: "yaml",
        extensions: &["yaml", "yml"],
        inline: &["#"],
        block: &[],
    },
];
