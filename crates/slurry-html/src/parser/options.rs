/// Feature switches of the parser.
///
/// Every switch is independent. [`ParserOptions::default`] gives the
/// behaviour expected for ordinary HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ParserOptions {
    /// Report namespace URIs and local names. When off both are empty.
    pub namespaces: bool,
    /// Drop start tags whose name the schema does not know.
    pub ignore_bogons: bool,
    /// Give unknown elements an empty content model instead of any content.
    pub bogons_empty: bool,
    /// Allow unknown elements to be the document element. When off they are
    /// placed under the schema's root element type.
    pub root_bogons: bool,
    /// Start elements with the attribute defaults declared by the schema.
    pub default_attributes: bool,
    /// Replace `:` in element, attribute and target names with `_`.
    pub translate_colons: bool,
    /// Reopen restartable elements that had to be closed early.
    pub restart_elements: bool,
    /// Report whitespace that has no place in the tree as ignorable
    /// whitespace instead of dropping it.
    pub ignorable_whitespace: bool,
    /// Treat the content of CDATA elements such as `script` as raw text.
    pub cdata_elements: bool,
    /// Print each repair through the shared warning channel.
    pub report_issues: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            namespaces: true,
            ignore_bogons: false,
            bogons_empty: false,
            root_bogons: true,
            default_attributes: true,
            translate_colons: false,
            restart_elements: true,
            ignorable_whitespace: false,
            cdata_elements: true,
            report_issues: false,
        }
    }
}

impl ParserOptions {
    /// Set [`Self::namespaces`].
    #[must_use]
    pub const fn with_namespaces(mut self, on: bool) -> Self {
        self.namespaces = on;
        self
    }

    /// Set [`Self::ignore_bogons`].
    #[must_use]
    pub const fn with_ignore_bogons(mut self, on: bool) -> Self {
        self.ignore_bogons = on;
        self
    }

    /// Set [`Self::bogons_empty`].
    #[must_use]
    pub const fn with_bogons_empty(mut self, on: bool) -> Self {
        self.bogons_empty = on;
        self
    }

    /// Set [`Self::root_bogons`].
    #[must_use]
    pub const fn with_root_bogons(mut self, on: bool) -> Self {
        self.root_bogons = on;
        self
    }

    /// Set [`Self::default_attributes`].
    #[must_use]
    pub const fn with_default_attributes(mut self, on: bool) -> Self {
        self.default_attributes = on;
        self
    }

    /// Set [`Self::translate_colons`].
    #[must_use]
    pub const fn with_translate_colons(mut self, on: bool) -> Self {
        self.translate_colons = on;
        self
    }

    /// Set [`Self::restart_elements`].
    #[must_use]
    pub const fn with_restart_elements(mut self, on: bool) -> Self {
        self.restart_elements = on;
        self
    }

    /// Set [`Self::ignorable_whitespace`].
    #[must_use]
    pub const fn with_ignorable_whitespace(mut self, on: bool) -> Self {
        self.ignorable_whitespace = on;
        self
    }

    /// Set [`Self::cdata_elements`].
    #[must_use]
    pub const fn with_cdata_elements(mut self, on: bool) -> Self {
        self.cdata_elements = on;
        self
    }

    /// Set [`Self::report_issues`].
    #[must_use]
    pub const fn with_report_issues(mut self, on: bool) -> Self {
        self.report_issues = on;
        self
    }
}
