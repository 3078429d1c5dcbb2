//! Flag types shared by the scanner and parser.

bitflags::bitflags! {
    /// Flags describing how a token was written.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TokenFlags: u16 {
        const NONE                 = 0;
        /// A line terminator occurred between the previous token and this one.
        const PRECEDING_LINE_BREAK = 1 << 0;
        /// The identifier or keyword was written with a `\u` escape.
        const UNICODE_ESCAPE       = 1 << 1;
        /// Legacy octal integer such as `017`.
        const OCTAL                = 1 << 2;
        /// Legacy decimal with a leading zero such as `089`.
        const NON_OCTAL_DECIMAL    = 1 << 3;
        const HEX_SPECIFIER        = 1 << 4;
        const BINARY_SPECIFIER     = 1 << 5;
        const OCTAL_SPECIFIER      = 1 << 6;
        const CONTAINS_SEPARATOR   = 1 << 7;
        const SCIENTIFIC           = 1 << 8;
        /// String literal contains a legacy octal escape or `\8` / `\9`.
        const OCTAL_ESCAPE         = 1 << 9;
        /// Template chunk contains an escape that has no cooked value.
        const INVALID_ESCAPE       = 1 << 10;
        const HAS_DECIMAL_POINT    = 1 << 11;

        /// Literals that strict mode code rejects.
        const LEGACY_OCTAL_LIKE = Self::OCTAL.bits() | Self::NON_OCTAL_DECIMAL.bits();
    }
}
