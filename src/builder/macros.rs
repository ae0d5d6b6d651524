//! Macros for declaring machine vocabularies.

/// Generate a `State` implementation for a fieldless enum.
///
/// Variants are indexed in declaration order.
///
/// # Example
///
/// ```
/// use hsm_dispatch::core::State;
/// use hsm_dispatch::state_enum;
///
/// state_enum! {
///     pub enum SessionState {
///         Idle,
///         AwaitingResponse,
///     }
/// }
///
/// assert_eq!(SessionState::AwaitingResponse.index(), 1);
/// assert_eq!(SessionState::Idle.name(), "Idle");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn index(&self) -> usize {
                *self as usize
            }

            fn all() -> &'static [Self] {
                &[$(Self::$variant),*]
            }
        }
    };
}

/// Generate an `Event` implementation for a fieldless enum.
///
/// The listed variants are the machine's table rows. Variants under
/// `escalates` are part of the machine's namespace but have no row: the
/// dispatch loop hands them back to the caller, which is how a sub-machine
/// reports something to its parent.
///
/// # Example
///
/// ```
/// use hsm_dispatch::core::Event;
/// use hsm_dispatch::event_enum;
///
/// event_enum! {
///     pub enum SessionEvent {
///         Request,
///         Response,
///     }
///     escalates: [Established]
/// }
///
/// assert_eq!(SessionEvent::Response.row(), Some(1));
/// assert_eq!(SessionEvent::Established.row(), None);
/// assert_eq!(SessionEvent::event_space().len(), 3);
/// ```
#[macro_export]
macro_rules! event_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(escalates: [$($(#[$escalate_meta:meta])* $escalate:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
            $($(
                $(#[$escalate_meta])*
                $escalate,
            )*)?
        }

        impl $crate::core::Event for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant),)*
                    $($(Self::$escalate => stringify!($escalate),)*)?
                }
            }

            fn local_events() -> &'static [Self] {
                &[$(Self::$variant),*]
            }

            fn event_space() -> Vec<Self> {
                vec![$(Self::$variant,)* $($(Self::$escalate,)*)?]
            }
        }
    };
}

/// Generate an `Action` implementation for a fieldless enum.
///
/// # Example
///
/// ```
/// use hsm_dispatch::action_enum;
/// use hsm_dispatch::core::Action;
///
/// action_enum! {
///     pub enum SessionAction {
///         SendRequest,
///         NoAction,
///     }
/// }
///
/// assert_eq!(SessionAction::SendRequest.name(), "SendRequest");
/// ```
#[macro_export]
macro_rules! action_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Action for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
