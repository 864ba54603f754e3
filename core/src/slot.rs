//! Typed destinations and the arity-N value assigner.
//!
//! A [`Slot`] wraps one caller-owned destination together with the code that
//! converts a raw token into it. Options are registered with an ordered list
//! of slots; after a parse pass [`assign_results`] feeds the collected tokens
//! into those slots position by position.

use std::fmt;
use std::str::FromStr;

use crate::error::AssignError;

/// One typed destination bound for the lifetime `'a` of the parser.
pub struct Slot<'a> {
    type_name: &'static str,
    assign: Box<dyn FnMut(&str) -> bool + 'a>,
}

impl<'a> Slot<'a> {
    /// Binds a destination parsed with [`FromStr`].
    ///
    /// `String` destinations receive the raw token unchanged. Any other type
    /// must parse the whole token, so `"12abc"` is rejected for an `i32`.
    ///
    /// # Examples
    ///
    /// ```
    /// use argbind_core::Slot;
    ///
    /// let mut port: u16 = 0;
    /// let mut slot = Slot::bind(&mut port);
    /// assert!(slot.assign("8080"));
    /// assert!(!slot.assign("http"));
    /// drop(slot);
    /// assert_eq!(port, 8080);
    /// ```
    pub fn bind<T>(target: &'a mut T) -> Self
    where
        T: FromStr + 'a,
    {
        Self {
            type_name: std::any::type_name::<T>(),
            assign: Box::new(move |token: &str| match token.parse::<T>() {
                Ok(value) => {
                    *target = value;
                    true
                }
                Err(_) => false,
            }),
        }
    }

    /// Binds every element of `targets`, in order.
    pub fn each<T>(targets: &'a mut [T]) -> Vec<Self>
    where
        T: FromStr + 'a,
    {
        targets.iter_mut().map(Slot::bind).collect()
    }

    /// Builds a slot from a custom conversion.
    ///
    /// `assign` returns `false` when the token is rejected; `type_name` is
    /// reported in the resulting error.
    pub fn from_fn<F>(type_name: &'static str, assign: F) -> Self
    where
        F: FnMut(&str) -> bool + 'a,
    {
        Self {
            type_name,
            assign: Box::new(assign),
        }
    }

    /// Converts `token` into the destination. Returns `false` on rejection,
    /// leaving the destination untouched.
    pub fn assign(&mut self, token: &str) -> bool {
        (self.assign)(token)
    }

    /// Name of the destination type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for Slot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// A single value that can become a [`Slot`].
pub trait BindSlot<'a> {
    fn bind_slot(self) -> Slot<'a>;
}

impl<'a, T> BindSlot<'a> for &'a mut T
where
    T: FromStr + 'a,
{
    fn bind_slot(self) -> Slot<'a> {
        Slot::bind(self)
    }
}

impl<'a> BindSlot<'a> for Slot<'a> {
    fn bind_slot(self) -> Slot<'a> {
        self
    }
}

/// An ordered list of destinations accepted by
/// [`ArgParser::add_option`](crate::ArgParser::add_option).
///
/// Implemented for `()`, a single `&mut T`, a [`Slot`], `Vec<Slot>` and
/// tuples of up to eight `&mut T` or [`Slot`] values.
pub trait IntoSlots<'a> {
    fn into_slots(self) -> Vec<Slot<'a>>;
}

impl<'a> IntoSlots<'a> for () {
    fn into_slots(self) -> Vec<Slot<'a>> {
        Vec::new()
    }
}

impl<'a, T> IntoSlots<'a> for &'a mut T
where
    T: FromStr + 'a,
{
    fn into_slots(self) -> Vec<Slot<'a>> {
        vec![Slot::bind(self)]
    }
}

impl<'a> IntoSlots<'a> for Slot<'a> {
    fn into_slots(self) -> Vec<Slot<'a>> {
        vec![self]
    }
}

impl<'a> IntoSlots<'a> for Vec<Slot<'a>> {
    fn into_slots(self) -> Vec<Slot<'a>> {
        self
    }
}

macro_rules! tuple_into_slots {
    ($($name:ident),+) => {
        impl<'a, $($name),+> IntoSlots<'a> for ($($name,)+)
        where
            $($name: BindSlot<'a>,)+
        {
            #[allow(non_snake_case)]
            fn into_slots(self) -> Vec<Slot<'a>> {
                let ($($name,)+) = self;
                vec![$($name.bind_slot()),+]
            }
        }
    };
}

tuple_into_slots!(A);
tuple_into_slots!(A, B);
tuple_into_slots!(A, B, C);
tuple_into_slots!(A, B, C, D);
tuple_into_slots!(A, B, C, D, E);
tuple_into_slots!(A, B, C, D, E, F);
tuple_into_slots!(A, B, C, D, E, F, G);
tuple_into_slots!(A, B, C, D, E, F, G, H);

/// Converts `results` into `slots`, position by position.
///
/// Fails with [`AssignError::Missing`] before touching any slot when fewer
/// results than slots were collected. Otherwise every slot is attempted;
/// successful slots keep their new value and the highest failing position is
/// reported. Results beyond the last slot are ignored.
///
/// # Examples
///
/// ```
/// use argbind_core::{AssignError, Slot, assign_results};
///
/// let mut count: i32 = 0;
/// let mut ratio: f32 = 0.0;
/// let mut slots = vec![Slot::bind(&mut count), Slot::bind(&mut ratio)];
///
/// let results = vec!["12".to_string()];
/// assert_eq!(assign_results(&results, &mut slots), Err(AssignError::Missing { index: 2 }));
///
/// let results = vec!["12".to_string(), "0.5".to_string()];
/// assert_eq!(assign_results(&results, &mut slots), Ok(()));
/// ```
pub fn assign_results(results: &[String], slots: &mut [Slot<'_>]) -> Result<(), AssignError> {
    if results.len() < slots.len() {
        return Err(AssignError::Missing {
            index: results.len() + 1,
        });
    }

    let mut failure = None;
    for (idx, (slot, token)) in slots.iter_mut().zip(results).enumerate() {
        if !slot.assign(token) {
            failure = Some(AssignError::Conversion {
                index: idx + 1,
                token: token.clone(),
                expected: slot.type_name(),
            });
        }
    }

    match failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
