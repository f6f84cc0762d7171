//! The built-in HTML 4 schema.
//!
//! Content models follow the transitional DTD loosely: the categories below
//! are coarse enough that real-world tag soup lands somewhere sensible, not
//! tight enough to validate anything.

use std::sync::LazyLock;

use crate::attributes::AttributeKind;
use crate::model::{Categories, ElementFlags};
use crate::schema::{Schema, SchemaError};

/// Namespace of the built-in schema.
pub const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

const fn category(bit: u32) -> Categories {
    Categories::from_bits(1 << bit)
}

const AREA: Categories = category(1);
const BLOCK: Categories = category(2);
const BLOCKINLINE: Categories = category(3);
const BODY: Categories = category(4);
const CELL: Categories = category(5);
const COL: Categories = category(6);
const DEF: Categories = category(7);
const FORM: Categories = category(8);
const FRAME: Categories = category(9);
const HEAD: Categories = category(10);
const HTML: Categories = category(11);
const INLINE: Categories = category(12);
const LEGEND: Categories = category(13);
const LI: Categories = category(14);
const NOLINK: Categories = category(15);
const OPTION: Categories = category(16);
const OPTIONS: Categories = category(17);
const P: Categories = category(18);
const PARAM: Categories = category(19);
const TABLE: Categories = category(20);
const TABULAR: Categories = category(21);
const TR: Categories = category(22);

const PCDATA: Categories = Categories::PCDATA;
const EMPTY: Categories = Categories::EMPTY;
const ROOT: Categories = Categories::ROOT;

const NONE: ElementFlags = ElementFlags::NONE;
const RESTART: ElementFlags = ElementFlags::RESTARTABLE;
const CDATA: ElementFlags = ElementFlags::CDATA;
const NOFORCE: ElementFlags = ElementFlags::NO_FORCE_CLOSE;

/// Content models shared by many elements.
const TEXT: Categories = Categories::from_bits(PCDATA.bits() | INLINE.bits());
const FLOW: Categories = Categories::from_bits(PCDATA.bits() | INLINE.bits() | BLOCK.bits());
const PHRASE: Categories = Categories::from_bits(INLINE.bits() | NOLINK.bits());

/// Format: (name, content model, member of, flags, natural parent)
const ELEMENTS: &[(&str, Categories, Categories, ElementFlags, &str)] = &[
    ("html", HTML, ROOT, NONE, ""),
    ("head", HEAD, HTML, NONE, "html"),
    ("body", FLOW, Categories::from_bits(HTML.bits() | BODY.bits()), NONE, "html"),
    ("frameset", FRAME, Categories::from_bits(FRAME.bits() | HTML.bits()), NONE, "html"),
    ("frame", EMPTY, FRAME, NONE, "frameset"),
    (
        "noframes",
        Categories::from_bits(BODY.bits() | BLOCK.bits() | INLINE.bits()),
        Categories::from_bits(BLOCK.bits() | HTML.bits() | FRAME.bits()),
        NONE,
        "html",
    ),
    // head content
    ("title", PCDATA, HEAD, NONE, "head"),
    ("base", EMPTY, HEAD, NONE, "head"),
    ("meta", EMPTY, HEAD, NONE, "head"),
    ("link", EMPTY, Categories::from_bits(HEAD.bits() | INLINE.bits()), NONE, "head"),
    ("isindex", EMPTY, HEAD, NONE, "head"),
    ("bgsound", EMPTY, HEAD, NONE, "head"),
    ("style", PCDATA, Categories::from_bits(HEAD.bits() | INLINE.bits()), CDATA, "head"),
    ("script", PCDATA, Categories::ANY.without(ROOT), CDATA, "html"),
    // blocks
    ("address", Categories::from_bits(TEXT.bits() | P.bits()), BLOCK, NONE, "body"),
    ("blockquote", FLOW, BLOCK, NONE, "body"),
    ("center", FLOW, BLOCK, NONE, "body"),
    ("div", FLOW, BLOCK, NONE, "body"),
    ("fieldset", Categories::from_bits(FLOW.bits() | LEGEND.bits()), BLOCK, NONE, "body"),
    ("legend", TEXT, LEGEND, NONE, "fieldset"),
    (
        "form",
        Categories::from_bits(FLOW.bits() | NOLINK.bits() | TR.bits() | CELL.bits()),
        Categories::from_bits(BLOCK.bits() | FORM.bits()),
        NOFORCE,
        "body",
    ),
    ("h1", TEXT, BLOCK, NONE, "body"),
    ("h2", TEXT, BLOCK, NONE, "body"),
    ("h3", TEXT, BLOCK, NONE, "body"),
    ("h4", TEXT, BLOCK, NONE, "body"),
    ("h5", TEXT, BLOCK, NONE, "body"),
    ("h6", TEXT, BLOCK, NONE, "body"),
    ("hr", EMPTY, BLOCK, NONE, "body"),
    ("listing", TEXT, BLOCK, NONE, "body"),
    ("noscript", FLOW, BLOCK, NONE, "body"),
    (
        "p",
        Categories::from_bits(TEXT.bits() | TABLE.bits()),
        Categories::from_bits(BLOCK.bits() | P.bits()),
        NONE,
        "body",
    ),
    ("pre", TEXT, BLOCK, NONE, "body"),
    ("xmp", TEXT, BLOCK, NONE, "body"),
    // lists
    ("dir", LI, BLOCK, NONE, "body"),
    ("menu", LI, BLOCK, NONE, "body"),
    ("ol", LI, BLOCK, NONE, "body"),
    ("ul", LI, BLOCK, NONE, "body"),
    ("li", FLOW, LI, NONE, "ul"),
    ("dl", DEF, BLOCK, NONE, "body"),
    ("dt", TEXT, DEF, NONE, "dl"),
    ("dd", FLOW, DEF, NONE, "dl"),
    // tables
    (
        "table",
        Categories::from_bits(FORM.bits() | TABULAR.bits()),
        Categories::from_bits(BLOCK.bits() | TABLE.bits()),
        NOFORCE,
        "body",
    ),
    ("caption", TEXT, TABULAR, NONE, "table"),
    ("colgroup", COL, TABULAR, NONE, "table"),
    ("col", EMPTY, Categories::from_bits(COL.bits() | TABULAR.bits()), NONE, "table"),
    ("thead", Categories::from_bits(TR.bits() | FORM.bits() | CELL.bits()), TABULAR, NONE, "table"),
    ("tbody", TR, TABULAR, NONE, "table"),
    ("tfoot", Categories::from_bits(TR.bits() | FORM.bits() | CELL.bits()), TABULAR, NONE, "table"),
    ("tr", Categories::from_bits(FORM.bits() | CELL.bits()), Categories::from_bits(TR.bits() | TABULAR.bits()), NONE, "tbody"),
    ("td", FLOW, CELL, NONE, "tr"),
    ("th", FLOW, CELL, NONE, "tr"),
    // inline formatting, reopened after a forced close
    ("b", TEXT, PHRASE, RESTART, "body"),
    ("big", TEXT, PHRASE, RESTART, "body"),
    ("blink", TEXT, PHRASE, RESTART, "body"),
    ("em", TEXT, PHRASE, RESTART, "body"),
    ("font", TEXT, PHRASE, RESTART, "body"),
    ("i", TEXT, PHRASE, RESTART, "body"),
    ("s", TEXT, PHRASE, RESTART, "body"),
    ("small", TEXT, PHRASE, RESTART, "body"),
    ("strike", TEXT, PHRASE, RESTART, "body"),
    ("strong", TEXT, PHRASE, RESTART, "body"),
    ("sub", TEXT, PHRASE, RESTART, "body"),
    ("sup", TEXT, PHRASE, RESTART, "body"),
    ("tt", TEXT, PHRASE, RESTART, "body"),
    ("u", TEXT, PHRASE, RESTART, "body"),
    (
        "del",
        FLOW,
        Categories::from_bits(INLINE.bits() | BLOCKINLINE.bits() | BLOCK.bits()),
        RESTART,
        "body",
    ),
    (
        "ins",
        FLOW,
        Categories::from_bits(INLINE.bits() | BLOCKINLINE.bits() | BLOCK.bits()),
        RESTART,
        "body",
    ),
    // other inline
    ("a", Categories::from_bits(PCDATA.bits() | NOLINK.bits()), INLINE, NONE, "body"),
    ("abbr", TEXT, PHRASE, NONE, "body"),
    ("acronym", TEXT, PHRASE, NONE, "body"),
    ("bdo", TEXT, PHRASE, NONE, "body"),
    ("cite", TEXT, PHRASE, NONE, "body"),
    ("code", TEXT, PHRASE, NONE, "body"),
    ("dfn", TEXT, PHRASE, NONE, "body"),
    ("kbd", TEXT, PHRASE, NONE, "body"),
    ("label", TEXT, PHRASE, NONE, "body"),
    ("marquee", TEXT, PHRASE, NONE, "body"),
    ("nobr", TEXT, PHRASE, NONE, "body"),
    ("q", TEXT, PHRASE, NONE, "body"),
    ("samp", TEXT, PHRASE, NONE, "body"),
    ("span", TEXT, PHRASE, NONE, "body"),
    ("var", TEXT, PHRASE, NONE, "body"),
    ("textarea", PCDATA, PHRASE, NONE, "body"),
    ("button", FLOW, PHRASE, NONE, "body"),
    ("iframe", FLOW, PHRASE, NONE, "body"),
    ("basefont", EMPTY, PHRASE, NONE, "body"),
    ("br", EMPTY, PHRASE, NONE, "body"),
    ("embed", EMPTY, PHRASE, NONE, "body"),
    ("img", EMPTY, PHRASE, NONE, "body"),
    ("input", EMPTY, PHRASE, NONE, "body"),
    ("wbr", EMPTY, PHRASE, NONE, "body"),
    ("map", Categories::from_bits(BLOCK.bits() | AREA.bits()), INLINE, NONE, "body"),
    ("area", EMPTY, AREA, NONE, "map"),
    (
        "applet",
        Categories::from_bits(FLOW.bits() | PARAM.bits()),
        PHRASE,
        NONE,
        "body",
    ),
    (
        "object",
        Categories::from_bits(FLOW.bits() | PARAM.bits()),
        Categories::from_bits(HEAD.bits() | PHRASE.bits()),
        NONE,
        "body",
    ),
    ("param", EMPTY, PARAM, NONE, "object"),
    ("select", OPTIONS, INLINE, NONE, "body"),
    ("optgroup", OPTIONS, OPTIONS, NONE, "select"),
    ("option", PCDATA, Categories::from_bits(OPTION.bits() | OPTIONS.bits()), NONE, "select"),
];

/// Format: (element, attribute, type, default value)
const ATTRIBUTES: &[(&str, &str, AttributeKind, Option<&str>)] = &[
    ("a", "hreflang", AttributeKind::Nmtoken, None),
    ("a", "name", AttributeKind::Name, None),
    ("a", "shape", AttributeKind::Cdata, Some("rect")),
    ("a", "tabindex", AttributeKind::Nmtoken, None),
    ("area", "nohref", AttributeKind::Nmtoken, None),
    ("area", "shape", AttributeKind::Cdata, Some("rect")),
    ("area", "tabindex", AttributeKind::Nmtoken, None),
    ("br", "clear", AttributeKind::Cdata, Some("none")),
    ("button", "disabled", AttributeKind::Nmtoken, None),
    ("button", "tabindex", AttributeKind::Nmtoken, None),
    ("button", "type", AttributeKind::Cdata, Some("submit")),
    ("col", "span", AttributeKind::Nmtoken, Some("1")),
    ("colgroup", "span", AttributeKind::Nmtoken, Some("1")),
    ("dir", "compact", AttributeKind::Nmtoken, None),
    ("dl", "compact", AttributeKind::Nmtoken, None),
    ("form", "enctype", AttributeKind::Cdata, Some("application/x-www-form-urlencoded")),
    ("form", "method", AttributeKind::Cdata, Some("get")),
    ("frame", "frameborder", AttributeKind::Cdata, Some("1")),
    ("frame", "scrolling", AttributeKind::Cdata, Some("auto")),
    ("hr", "noshade", AttributeKind::Nmtoken, None),
    ("iframe", "frameborder", AttributeKind::Cdata, Some("1")),
    ("iframe", "scrolling", AttributeKind::Cdata, Some("auto")),
    ("img", "ismap", AttributeKind::Nmtoken, None),
    ("input", "checked", AttributeKind::Nmtoken, None),
    ("input", "disabled", AttributeKind::Nmtoken, None),
    ("input", "ismap", AttributeKind::Nmtoken, None),
    ("input", "maxlength", AttributeKind::Nmtoken, None),
    ("input", "readonly", AttributeKind::Nmtoken, None),
    ("input", "tabindex", AttributeKind::Nmtoken, None),
    ("input", "type", AttributeKind::Cdata, Some("text")),
    ("label", "for", AttributeKind::Idref, None),
    ("li", "value", AttributeKind::Nmtoken, None),
    ("link", "hreflang", AttributeKind::Nmtoken, None),
    ("meta", "http-equiv", AttributeKind::Name, None),
    ("meta", "name", AttributeKind::Name, None),
    ("object", "declare", AttributeKind::Nmtoken, None),
    ("object", "tabindex", AttributeKind::Nmtoken, None),
    ("ol", "compact", AttributeKind::Nmtoken, None),
    ("ol", "start", AttributeKind::Nmtoken, None),
    ("optgroup", "disabled", AttributeKind::Nmtoken, None),
    ("option", "disabled", AttributeKind::Nmtoken, None),
    ("option", "selected", AttributeKind::Nmtoken, None),
    ("param", "name", AttributeKind::Cdata, None),
    ("param", "valuetype", AttributeKind::Cdata, Some("data")),
    ("pre", "width", AttributeKind::Nmtoken, None),
    ("script", "defer", AttributeKind::Nmtoken, None),
    ("select", "disabled", AttributeKind::Nmtoken, None),
    ("select", "multiple", AttributeKind::Nmtoken, None),
    ("select", "size", AttributeKind::Nmtoken, None),
    ("select", "tabindex", AttributeKind::Nmtoken, None),
    ("td", "colspan", AttributeKind::Nmtoken, Some("1")),
    ("td", "headers", AttributeKind::Idrefs, None),
    ("td", "nowrap", AttributeKind::Nmtoken, None),
    ("td", "rowspan", AttributeKind::Nmtoken, Some("1")),
    ("textarea", "cols", AttributeKind::Nmtoken, None),
    ("textarea", "disabled", AttributeKind::Nmtoken, None),
    ("textarea", "readonly", AttributeKind::Nmtoken, None),
    ("textarea", "rows", AttributeKind::Nmtoken, None),
    ("textarea", "tabindex", AttributeKind::Nmtoken, None),
    ("th", "colspan", AttributeKind::Nmtoken, Some("1")),
    ("th", "headers", AttributeKind::Idrefs, None),
    ("th", "nowrap", AttributeKind::Nmtoken, None),
    ("th", "rowspan", AttributeKind::Nmtoken, Some("1")),
    ("ul", "compact", AttributeKind::Nmtoken, None),
];

/// Attributes declared on every element type.
const COMMON_ATTRIBUTES: &[(&str, AttributeKind)] = &[
    ("id", AttributeKind::Id),
    ("class", AttributeKind::Nmtokens),
    ("dir", AttributeKind::Nmtoken),
    ("lang", AttributeKind::Nmtoken),
];

/// Names of the Latin-1 entities, in code point order from U+00A0.
const LATIN1_ENTITIES: [&str; 96] = [
    "nbsp", "iexcl", "cent", "pound", "curren", "yen", "brvbar", "sect", "uml", "copy", "ordf",
    "laquo", "not", "shy", "reg", "macr", "deg", "plusmn", "sup2", "sup3", "acute", "micro",
    "para", "middot", "cedil", "sup1", "ordm", "raquo", "frac14", "frac12", "frac34", "iquest",
    "Agrave", "Aacute", "Acirc", "Atilde", "Auml", "Aring", "AElig", "Ccedil", "Egrave", "Eacute",
    "Ecirc", "Euml", "Igrave", "Iacute", "Icirc", "Iuml", "ETH", "Ntilde", "Ograve", "Oacute",
    "Ocirc", "Otilde", "Ouml", "times", "Oslash", "Ugrave", "Uacute", "Ucirc", "Uuml", "Yacute",
    "THORN", "szlig", "agrave", "aacute", "acirc", "atilde", "auml", "aring", "aelig", "ccedil",
    "egrave", "eacute", "ecirc", "euml", "igrave", "iacute", "icirc", "iuml", "eth", "ntilde",
    "ograve", "oacute", "ocirc", "otilde", "ouml", "divide", "oslash", "ugrave", "uacute", "ucirc",
    "uuml", "yacute", "thorn", "yuml",
];

/// Greek capitals from U+0391, lowercase from U+03B1. U+03A2 is unassigned;
/// its lowercase counterpart is final sigma.
const GREEK_ENTITIES: [&str; 25] = [
    "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta", "iota", "kappa",
    "lambda", "mu", "nu", "xi", "omicron", "pi", "rho", "", "sigma", "tau", "upsilon", "phi",
    "chi", "psi", "omega",
];

const SPECIAL_ENTITIES: &[(&str, u32)] = &[
    ("quot", 34),
    ("amp", 38),
    ("apos", 39),
    ("lt", 60),
    ("gt", 62),
    ("OElig", 338),
    ("oelig", 339),
    ("Scaron", 352),
    ("scaron", 353),
    ("Yuml", 376),
    ("fnof", 402),
    ("circ", 710),
    ("tilde", 732),
    ("sigmaf", 962),
    ("thetasym", 977),
    ("upsih", 978),
    ("piv", 982),
    ("ensp", 8194),
    ("emsp", 8195),
    ("thinsp", 8201),
    ("zwnj", 8204),
    ("zwj", 8205),
    ("lrm", 8206),
    ("rlm", 8207),
    ("ndash", 8211),
    ("mdash", 8212),
    ("lsquo", 8216),
    ("rsquo", 8217),
    ("sbquo", 8218),
    ("ldquo", 8220),
    ("rdquo", 8221),
    ("bdquo", 8222),
    ("dagger", 8224),
    ("Dagger", 8225),
    ("bull", 8226),
    ("hellip", 8230),
    ("permil", 8240),
    ("prime", 8242),
    ("Prime", 8243),
    ("lsaquo", 8249),
    ("rsaquo", 8250),
    ("oline", 8254),
    ("frasl", 8260),
    ("euro", 8364),
    ("image", 8465),
    ("weierp", 8472),
    ("real", 8476),
    ("trade", 8482),
    ("alefsym", 8501),
    ("larr", 8592),
    ("uarr", 8593),
    ("rarr", 8594),
    ("darr", 8595),
    ("harr", 8596),
    ("crarr", 8629),
    ("lArr", 8656),
    ("uArr", 8657),
    ("rArr", 8658),
    ("dArr", 8659),
    ("hArr", 8660),
    ("forall", 8704),
    ("part", 8706),
    ("exist", 8707),
    ("empty", 8709),
    ("nabla", 8711),
    ("isin", 8712),
    ("notin", 8713),
    ("ni", 8715),
    ("prod", 8719),
    ("sum", 8721),
    ("minus", 8722),
    ("lowast", 8727),
    ("radic", 8730),
    ("prop", 8733),
    ("infin", 8734),
    ("ang", 8736),
    ("and", 8743),
    ("or", 8744),
    ("cap", 8745),
    ("cup", 8746),
    ("int", 8747),
    ("there4", 8756),
    ("sim", 8764),
    ("cong", 8773),
    ("asymp", 8776),
    ("ne", 8800),
    ("equiv", 8801),
    ("le", 8804),
    ("ge", 8805),
    ("sub", 8834),
    ("sup", 8835),
    ("nsub", 8836),
    ("sube", 8838),
    ("supe", 8839),
    ("oplus", 8853),
    ("otimes", 8855),
    ("perp", 8869),
    ("sdot", 8901),
    ("lceil", 8968),
    ("rceil", 8969),
    ("lfloor", 8970),
    ("rfloor", 8971),
    ("lang", 9001),
    ("rang", 9002),
    ("loz", 9674),
    ("spades", 9824),
    ("clubs", 9827),
    ("hearts", 9829),
    ("diams", 9830),
];

static HTML_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::html().expect("built-in HTML schema tables are consistent")
});

/// The process-wide built-in HTML schema.
///
/// # Panics
///
/// Panics on first use if the built-in tables reference an undeclared
/// element type, which the crate's own tests rule out.
#[must_use]
pub fn html_schema() -> &'static Schema {
    &HTML_SCHEMA
}

impl Schema {
    /// Build a fresh copy of the built-in HTML schema.
    ///
    /// Prefer [`html_schema`] unless the copy is going to be extended.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] if the built-in tables are inconsistent.
    pub fn html() -> Result<Self, SchemaError> {
        let mut schema = Self::new(HTML_NAMESPACE, "html");

        for &(name, model, member_of, flags, _) in ELEMENTS {
            schema.element_type(name, model, member_of, flags);
        }
        schema.parent(Schema::PCDATA, "body")?;
        for &(name, _, _, _, parent) in ELEMENTS {
            if !parent.is_empty() {
                schema.parent(name, parent)?;
            }
        }

        for &(name, ..) in ELEMENTS {
            for &(attribute, kind) in COMMON_ATTRIBUTES {
                schema.attribute(name, attribute, kind, None)?;
            }
        }
        for &(element, attribute, kind, value) in ATTRIBUTES {
            schema.attribute(element, attribute, kind, value)?;
        }

        for &(name, value) in SPECIAL_ENTITIES {
            schema.entity(name, value);
        }
        for (offset, name) in (0u32..).zip(LATIN1_ENTITIES) {
            schema.entity(name, 0xA0 + offset);
        }
        for (offset, name) in (0u32..).zip(GREEK_ENTITIES) {
            if name.is_empty() {
                continue;
            }
            let mut capital = name.to_string();
            capital[..1].make_ascii_uppercase();
            schema.entity(&capital, 0x391 + offset);
            schema.entity(name, 0x3B1 + offset);
        }

        Ok(schema)
    }
}
