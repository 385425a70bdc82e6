//! Object filter dispatcher
//!
//! Classifies every intercepted code and decides whether it passes
//! through to the firmware or is short-circuited. Control M-codes
//! configure the registries, boundary comments move the current-object
//! pointer, and everything else is suppressed while the current object is
//! marked for filtering.

use super::{matcher, messages, FilterState, ObjectRegistry, PatternRegistry};
use crate::connection::{InterceptConnection, ResolveResult};
use crate::error::{ConnectionError, Result};
use crate::{Code, CodeKind};
use tracing::{debug, info, warn};

/// Default M-code managing identifier patterns
pub const DEFAULT_MANAGE_IDENTIFIER_PATTERN: i32 = 50;
/// Default M-code managing object ids
pub const DEFAULT_MANAGE_OBJECT_IDS: i32 = 51;
/// Default M-code managing the current object
pub const DEFAULT_CURRENT_OBJECT_ID: i32 = 52;
/// Default M-code disabling the filter
pub const DEFAULT_DISABLE: i32 = 53;

/// M-code numbers bound to the control operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlCodes {
    /// List, add, enable or disable identifier patterns
    pub manage_identifier_pattern: i32,
    /// List, add, enable or disable object ids
    pub manage_object_ids: i32,
    /// Report or mark the current object
    pub current_object_id: i32,
    /// Stop filtering, optionally clearing the registries
    pub disable: i32,
}

impl Default for ControlCodes {
    fn default() -> Self {
        Self {
            manage_identifier_pattern: DEFAULT_MANAGE_IDENTIFIER_PATTERN,
            manage_object_ids: DEFAULT_MANAGE_OBJECT_IDS,
            current_object_id: DEFAULT_CURRENT_OBJECT_ID,
            disable: DEFAULT_DISABLE,
        }
    }
}

/// Control operation requested by an M-code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ControlOp {
    ManagePatterns,
    ManageObjectIds,
    CurrentObject,
    Disable,
}

impl ControlCodes {
    fn operation(&self, number: i32) -> Option<ControlOp> {
        // Checked in this order so a misconfigured duplicate binds to the first
        if number == self.manage_identifier_pattern {
            Some(ControlOp::ManagePatterns)
        } else if number == self.manage_object_ids {
            Some(ControlOp::ManageObjectIds)
        } else if number == self.current_object_id {
            Some(ControlOp::CurrentObject)
        } else if number == self.disable {
            Some(ControlOp::Disable)
        } else {
            None
        }
    }
}

/// What to do with an intercepted code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Pass the code through unmodified
    Ignore,
    /// Short-circuit the code
    Resolve {
        /// Reported result
        result: ResolveResult,
        /// Message shown to the operator, may be empty
        message: String,
    },
}

impl Decision {
    /// Resolve successfully with a message
    pub fn success(message: impl Into<String>) -> Self {
        Self::Resolve {
            result: ResolveResult::Success,
            message: message.into(),
        }
    }

    /// Resolve successfully with an empty body, cancelling the code
    pub fn suppress() -> Self {
        Self::success(String::new())
    }

    /// Whether the code reaches the firmware
    pub fn passes_through(&self) -> bool {
        matches!(self, Self::Ignore)
    }

    /// Deliver the decision over the connection
    pub fn apply<C: InterceptConnection + ?Sized>(&self, connection: &mut C) -> Result<()> {
        match self {
            Self::Ignore => connection.ignore_code(),
            Self::Resolve { result, message } => connection.resolve_code(*result, message),
        }
    }
}

/// Filters the commands of cancelled objects out of the code stream
#[derive(Debug, Clone, Default)]
pub struct ObjectFilter {
    codes: ControlCodes,
    patterns: PatternRegistry,
    objects: ObjectRegistry,
    state: FilterState,
}

impl ObjectFilter {
    /// Create a filter with empty registries
    pub fn new(codes: ControlCodes) -> Self {
        Self {
            codes,
            ..Self::default()
        }
    }

    /// Control M-code bindings
    pub fn control_codes(&self) -> &ControlCodes {
        &self.codes
    }

    /// Registered identifier patterns
    pub fn patterns(&self) -> &PatternRegistry {
        &self.patterns
    }

    /// Object registry
    pub fn objects(&self) -> &ObjectRegistry {
        &self.objects
    }

    /// Live filter state
    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Decide what happens to `code`, updating registries and state
    pub fn handle(&mut self, code: &Code) -> Decision {
        match code.kind() {
            CodeKind::ControlCommand(number) => match self.codes.operation(number) {
                Some(op) => {
                    info!(code = %code, "Control command");
                    self.handle_control(op, code)
                }
                None => self.pass_or_suppress(),
            },
            CodeKind::Comment(text) => {
                self.handle_comment(text);
                Decision::Ignore
            }
            CodeKind::Other => self.pass_or_suppress(),
        }
    }

    fn handle_control(&mut self, op: ControlOp, code: &Code) -> Decision {
        match op {
            ControlOp::ManagePatterns => {
                let prefix = code.string_parameter('P');
                if prefix.is_empty() {
                    return Decision::success(messages::pattern_listing(&self.patterns.list()));
                }
                let enabled = code.u64_parameter_or('S', 1) == 1;
                debug!(pattern = %prefix, enabled, "Pattern updated");
                self.patterns.set(prefix, enabled);
                Decision::suppress()
            }
            ControlOp::ManageObjectIds => {
                let id = code.string_parameter('P');
                if id.is_empty() {
                    return Decision::success(messages::object_listing(
                        &self.objects.filtered_ids(),
                    ));
                }
                let enabled = code.u64_parameter_or('S', 1) == 1;
                debug!(object_id = %id, enabled, "Object filter updated");
                self.objects.set_filtered(id, enabled);
                Decision::suppress()
            }
            ControlOp::CurrentObject => match code.u64_parameter_or('S', 0) {
                0 => Decision::success(messages::current_object_report(
                    self.state.current_object(),
                    &self.objects.known_ids(),
                )),
                mode @ (1 | 2) => {
                    self.objects
                        .set_filtered(self.state.current_object_id.clone(), true);
                    if mode == 2 {
                        self.state.filtering = true;
                    }
                    debug!(
                        object_id = %self.state.current_object_id,
                        filtering = self.state.filtering,
                        "Current object marked for filtering"
                    );
                    Decision::suppress()
                }
                _ => Decision::suppress(),
            },
            ControlOp::Disable => {
                self.state.filtering = false;
                let clear = code.u64_parameter_or('S', 0) == 1;
                if clear {
                    self.patterns.clear();
                    self.objects.clear();
                }
                Decision::success(messages::filtering_disabled(clear))
            }
        }
    }

    fn handle_comment(&mut self, text: &str) {
        let comment = text.trim();
        let Some(prefix) = self.patterns.match_comment(comment) else {
            return;
        };

        let id = matcher::strip_prefix_chars(comment, prefix);
        let filtering = self.objects.is_filtered(&id);
        if filtering != self.state.filtering || id != self.state.current_object_id {
            debug!(object_id = %id, filtering, "Object boundary");
        }
        self.objects.record_known(id.clone());
        self.state.enter_object(id, filtering);
    }

    fn pass_or_suppress(&self) -> Decision {
        if self.state.filtering {
            Decision::suppress()
        } else {
            Decision::Ignore
        }
    }

    /// Receive one code, decide, and deliver the decision
    ///
    /// State changes made while deciding are kept even if delivery fails.
    pub fn process_next<C: InterceptConnection + ?Sized>(
        &mut self,
        connection: &mut C,
    ) -> Result<Decision> {
        let code = connection.receive_code()?;
        let decision = self.handle(&code);
        decision.apply(connection)?;
        Ok(decision)
    }

    /// Process codes until the connection can no longer deliver any
    ///
    /// Receive and delivery failures are logged and the loop moves on to
    /// the next code. Returns once the peer has closed the stream.
    pub fn run<C: InterceptConnection + ?Sized>(&mut self, connection: &mut C) -> Result<()> {
        loop {
            match self.process_next(connection) {
                Ok(_) => {}
                Err(ConnectionError::Disconnected) => {
                    info!("Interception connection closed");
                    return Ok(());
                }
                Err(e) => warn!(error = %e, "Error processing code"),
            }
        }
    }
}
