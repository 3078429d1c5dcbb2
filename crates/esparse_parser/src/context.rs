//! Grammar context flags.
//!
//! The parser carries one `Context` value describing where it currently is.
//! Productions that change it go through [`crate::Parser::with_context`],
//! which restores the previous flags on every exit path.

use crate::options::ParseOptions;

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Context: u32 {
        const NONE                  = 0;
        const STRICT                = 1 << 0;
        const MODULE                = 1 << 1;
        /// Inside any function body (including arrows).
        const IN_FUNCTION           = 1 << 2;
        /// `yield` is an operator.
        const IN_GENERATOR          = 1 << 3;
        /// `await` is an operator.
        const IN_ASYNC              = 1 << 4;
        /// Unlabelled `break` is allowed.
        const IN_SWITCH             = 1 << 5;
        /// Unlabelled `break` and `continue` are allowed.
        const IN_ITERATION          = 1 << 6;
        const IN_CLASS_STATIC_BLOCK = 1 << 7;
        /// `in` is the for-in keyword, not a relational operator.
        const DISALLOW_IN           = 1 << 8;
        const WEB_COMPAT            = 1 << 9;
        /// Directly in the program body.
        const TOP_LEVEL             = 1 << 10;
        const ALLOW_RETURN          = 1 << 11;
        const ALLOW_NEW_TARGET      = 1 << 12;
        const ALLOW_SUPER_PROPERTY  = 1 << 13;
        const ALLOW_SUPER_CALL      = 1 << 14;
        /// Parsing formal parameters: `yield` and `await` expressions are errors.
        const IN_PARAMETERS         = 1 << 15;
        /// Class field initializer or static block.
        const DISALLOW_ARGUMENTS    = 1 << 16;
        /// Staged syntax is enabled.
        const NEXT                  = 1 << 17;
        /// Redeclaration checks are enabled.
        const LEXICAL               = 1 << 18;

        /// Flags that survive into a nested function body.
        const INHERITED = Self::STRICT.bits()
            | Self::MODULE.bits()
            | Self::WEB_COMPAT.bits()
            | Self::NEXT.bits()
            | Self::LEXICAL.bits();
        /// Flags an arrow function takes over from its surroundings.
        const ARROW_INHERITED = Self::INHERITED.bits()
            | Self::ALLOW_NEW_TARGET.bits()
            | Self::ALLOW_SUPER_PROPERTY.bits()
            | Self::ALLOW_SUPER_CALL.bits()
            | Self::DISALLOW_ARGUMENTS.bits()
            | Self::IN_CLASS_STATIC_BLOCK.bits();
    }
}

impl Context {
    /// The context at the start of a program. Contradictory option
    /// combinations are resolved here, before the first token.
    pub fn from_options(options: &ParseOptions) -> Self {
        let options = options.normalized();
        let mut context = Context::TOP_LEVEL;
        if options.strict {
            context |= Context::STRICT;
        }
        if options.is_module() {
            // Top-level await.
            context |= Context::MODULE | Context::STRICT | Context::IN_ASYNC;
        }
        if options.webcompat {
            context |= Context::WEB_COMPAT;
        }
        if options.next {
            context |= Context::NEXT;
        }
        if options.lexical {
            context |= Context::LEXICAL;
        }
        if options.global_return {
            context |= Context::ALLOW_RETURN;
        }
        context
    }

    #[inline]
    pub fn is_strict(self) -> bool {
        self.contains(Context::STRICT)
    }

    /// Annex B grammar applies: sloppy mode with web compatibility on.
    #[inline]
    pub fn is_annex_b(self) -> bool {
        self.contains(Context::WEB_COMPAT) && !self.contains(Context::STRICT)
    }

    /// `await` cannot name a binding or reference here.
    #[inline]
    pub fn await_is_reserved(self) -> bool {
        self.intersects(Context::IN_ASYNC | Context::MODULE | Context::IN_CLASS_STATIC_BLOCK)
    }

    /// `yield` cannot name a binding or reference here.
    #[inline]
    pub fn yield_is_reserved(self) -> bool {
        self.intersects(Context::IN_GENERATOR | Context::STRICT)
    }
}
