//! Checked integer arithmetic for consensus code, where a silent wrap is a consensus fault.

/// Error representing the failure of an arithmetic operation.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ArithError {
    Overflow,
    DivisionByZero,
}

pub type Result<T> = std::result::Result<T, ArithError>;

macro_rules! assign_method {
    ($name:ident, $op:ident, $rhs_ty:ty, $doc_op:expr) => {
        #[doc = "Safe variant of `"]
        #[doc = $doc_op]
        #[doc = "`."]
        #[inline]
        fn $name(&mut self, other: $rhs_ty) -> Result<()> {
            *self = self.$op(other)?;
            Ok(())
        }
    };
}

/// Trait providing safe arithmetic operations for built-in types.
pub trait SafeArith<Rhs = Self>: Sized + Copy {
    const ZERO: Self;
    const ONE: Self;

    /// Safe variant of `+` that guards against overflow.
    fn safe_add(&self, other: Rhs) -> Result<Self>;

    /// Safe variant of `-` that guards against overflow.
    fn safe_sub(&self, other: Rhs) -> Result<Self>;

    /// Safe variant of `*` that guards against overflow.
    fn safe_mul(&self, other: Rhs) -> Result<Self>;

    /// Safe variant of `/` that guards against division by 0.
    fn safe_div(&self, other: Rhs) -> Result<Self>;

    /// Safe variant of `%` that guards against division by 0.
    fn safe_rem(&self, other: Rhs) -> Result<Self>;

    assign_method!(safe_add_assign, safe_add, Rhs, "+=");
    assign_method!(safe_sub_assign, safe_sub, Rhs, "-=");
    assign_method!(safe_mul_assign, safe_mul, Rhs, "*=");
    assign_method!(safe_div_assign, safe_div, Rhs, "/=");
    assign_method!(safe_rem_assign, safe_rem, Rhs, "%=");
}

macro_rules! impl_safe_arith {
    ($typ:ty) => {
        impl SafeArith for $typ {
            const ZERO: Self = 0;
            const ONE: Self = 1;

            #[inline]
            fn safe_add(&self, other: Self) -> Result<Self> {
                self.checked_add(other).ok_or(ArithError::Overflow)
            }

            #[inline]
            fn safe_sub(&self, other: Self) -> Result<Self> {
                self.checked_sub(other).ok_or(ArithError::Overflow)
            }

            #[inline]
            fn safe_mul(&self, other: Self) -> Result<Self> {
                self.checked_mul(other).ok_or(ArithError::Overflow)
            }

            #[inline]
            fn safe_div(&self, other: Self) -> Result<Self> {
                self.checked_div(other).ok_or(ArithError::DivisionByZero)
            }

            #[inline]
            fn safe_rem(&self, other: Self) -> Result<Self> {
                self.checked_rem(other).ok_or(ArithError::DivisionByZero)
            }
        }
    };
}

impl_safe_arith!(u8);
impl_safe_arith!(u32);
impl_safe_arith!(u64);
impl_safe_arith!(usize);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn slot_arithmetic() {
        let slot = 6u64;
        assert_eq!(slot.safe_add(1), Ok(7));
        assert_eq!(slot.safe_sub(6), Ok(0));
        assert_eq!(slot.safe_mul(32), Ok(192));
        assert_eq!(slot.safe_div(4), Ok(1));
        assert_eq!(slot.safe_rem(4), Ok(2));
    }

    #[test]
    fn mutate() {
        let mut x = 0usize;
        x.safe_add_assign(9).unwrap();
        assert_eq!(x, 9);
        x.safe_rem_assign(4).unwrap();
        assert_eq!(x, 1);
        x.safe_sub_assign(1).unwrap();
        assert_eq!(x, 0);
        x.safe_mul_assign(3).unwrap();
        assert_eq!(x, 0);
    }

    #[test]
    fn errors() {
        assert_eq!(u64::MAX.safe_add(1), Err(ArithError::Overflow));
        assert_eq!(0u64.safe_sub(1), Err(ArithError::Overflow));
        assert_eq!(u64::MAX.safe_mul(2), Err(ArithError::Overflow));
        assert_eq!(7usize.safe_div(0), Err(ArithError::DivisionByZero));
        assert_eq!(7usize.safe_rem(0), Err(ArithError::DivisionByZero));
        assert!(u8::MAX.safe_add(1).is_err());
    }
}
