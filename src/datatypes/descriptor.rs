//! Type-erased datatype descriptors.
//!
//! A `DatatypeDescriptor` holds one function pointer per capability the
//! datatype supports, each a monomorphized wrapper around the typed trait
//! implementation. Capabilities are chosen through `DescriptorBuilder`,
//! whose methods only exist when the datatype implements the matching
//! trait, so a descriptor can never claim a capability it does not have.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use super::LiteralType;
use super::capabilities::*;
use super::value::{Value, ValueRepr};
use crate::{Error, Result};

pub type FromStringFn = fn(&str) -> Result<Value>;
pub type ToStringFn = fn(&Value) -> Result<String>;
pub type LogicalFn = fn(&Value) -> Result<bool>;
pub type CompareFn = fn(&Value, &Value) -> Result<Option<Ordering>>;
pub type UnaryFn = fn(&Value) -> Result<Value>;
pub type BinaryFn = fn(&Value, &Value) -> Result<Value>;
pub type TryInlineFn = fn(&Value) -> Option<u64>;
pub type FromInlinedFn = fn(u64) -> Value;

/// Arithmetic entry points of a `Numeric` datatype.
#[derive(Clone, Copy)]
pub struct NumericOps {
    pub add: BinaryFn,
    pub sub: BinaryFn,
    pub mul: BinaryFn,
    pub div: BinaryFn,
    /// Datatype of `div` results.
    pub div_result: &'static str,
    pub abs: UnaryFn,
    pub round: UnaryFn,
    pub floor: UnaryFn,
    pub ceil: UnaryFn,
}

/// A value conversion into another datatype.
#[derive(Clone, Copy)]
pub struct Conversion {
    pub target: &'static str,
    pub convert: UnaryFn,
}

#[derive(Clone, Copy)]
pub struct SubtypeOps {
    pub supertype: &'static str,
    pub from_supertype: UnaryFn,
    pub into_supertype: UnaryFn,
}

#[derive(Clone, Copy)]
pub struct InlineOps {
    pub try_into_inlined: TryInlineFn,
    pub from_inlined: FromInlinedFn,
}

/// Registered record of one literal datatype.
#[derive(Clone)]
pub struct DatatypeDescriptor {
    identifier: &'static str,
    fixed_id: Option<LiteralType>,
    from_string: FromStringFn,
    to_canonical_string: ToStringFn,
    to_simplified_string: ToStringFn,
    logical: Option<LogicalFn>,
    numeric: Option<NumericOps>,
    numeric_stub: Option<Conversion>,
    comparable: Option<CompareFn>,
    subtype: Option<SubtypeOps>,
    promotion: Option<Conversion>,
    double_promotion: Option<UnaryFn>,
    inlining: Option<InlineOps>,
}

impl DatatypeDescriptor {
    /// Starts a descriptor with only the default capability.
    pub fn builder<T: LiteralDatatype>() -> DescriptorBuilder<T> {
        DescriptorBuilder {
            descriptor: DatatypeDescriptor {
                identifier: T::IDENTIFIER,
                fixed_id: None,
                from_string: erased_from_string::<T>,
                to_canonical_string: erased_canonical::<T>,
                to_simplified_string: erased_simplified::<T>,
                logical: None,
                numeric: None,
                numeric_stub: None,
                comparable: None,
                subtype: None,
                promotion: None,
                double_promotion: None,
                inlining: None,
            },
            _datatype: PhantomData,
        }
    }

    pub fn identifier(&self) -> &'static str {
        self.identifier
    }

    pub fn fixed_id(&self) -> Option<LiteralType> {
        self.fixed_id
    }

    pub fn supertype(&self) -> Option<&'static str> {
        self.subtype.map(|s| s.supertype)
    }

    pub fn numeric_ops(&self) -> Option<&NumericOps> {
        self.numeric.as_ref()
    }

    pub fn numeric_stub(&self) -> Option<&Conversion> {
        self.numeric_stub.as_ref()
    }

    pub fn promotion(&self) -> Option<&Conversion> {
        self.promotion.as_ref()
    }

    /// Direct conversion to `xsd:double`, bypassing the promotion chain.
    pub fn double_promotion(&self) -> Option<UnaryFn> {
        self.double_promotion
    }

    pub fn subtype_ops(&self) -> Option<&SubtypeOps> {
        self.subtype.as_ref()
    }

    /// Whether arithmetic is available, natively or through a stub.
    pub fn is_numeric(&self) -> bool {
        self.numeric.is_some() || self.numeric_stub.is_some()
    }

    pub fn is_comparable(&self) -> bool {
        self.comparable.is_some()
    }

    pub fn is_inlineable(&self) -> bool {
        self.inlining.is_some()
    }

    /// Names of the capabilities this descriptor was composed from.
    pub fn capabilities(&self) -> Vec<&'static str> {
        let mut caps = vec!["Default"];
        let flags = [
            (self.logical.is_some(), "Logical"),
            (self.numeric.is_some(), "Numeric"),
            (self.numeric_stub.is_some(), "NumericStub"),
            (self.comparable.is_some(), "Comparable"),
            (self.subtype.is_some(), "Subtype"),
            (self.promotion.is_some(), "Promotable"),
            (self.double_promotion.is_some(), "DoublePromotable"),
            (self.fixed_id.is_some(), "FixedId"),
            (self.inlining.is_some(), "Inlineable"),
        ];
        caps.extend(flags.into_iter().filter(|(on, _)| *on).map(|(_, name)| name));
        caps
    }

    fn unsupported(&self, capability: &'static str) -> Error {
        Error::UnsupportedCapability {
            datatype: self.identifier.to_owned(),
            capability,
        }
    }

    // ========================================================================
    // Capability entry points
    // ========================================================================

    pub fn from_string(&self, s: &str) -> Result<Value> {
        (self.from_string)(s)
    }

    pub fn to_canonical_string(&self, value: &Value) -> Result<String> {
        (self.to_canonical_string)(value)
    }

    pub fn to_simplified_string(&self, value: &Value) -> Result<String> {
        (self.to_simplified_string)(value)
    }

    pub fn effective_boolean_value(&self, value: &Value) -> Result<bool> {
        let ebv = self.logical.ok_or_else(|| self.unsupported("Logical"))?;
        ebv(value)
    }

    /// Compares two values of this datatype.
    pub fn compare(&self, lhs: &Value, rhs: &Value) -> Result<Option<Ordering>> {
        let compare = self.comparable.ok_or_else(|| self.unsupported("Comparable"))?;
        compare(lhs, rhs)
    }

    pub fn from_supertype(&self, value: &Value) -> Result<Value> {
        let ops = self.subtype.ok_or_else(|| self.unsupported("Subtype"))?;
        (ops.from_supertype)(value)
    }

    pub fn into_supertype(&self, value: &Value) -> Result<Value> {
        let ops = self.subtype.ok_or_else(|| self.unsupported("Subtype"))?;
        (ops.into_supertype)(value)
    }

    /// The 48-bit inline payload for `value`, if this datatype inlines and
    /// the value fits.
    pub fn try_into_inlined(&self, value: &Value) -> Option<u64> {
        self.inlining.and_then(|ops| (ops.try_into_inlined)(value))
    }

    pub fn from_inlined(&self, payload: u64) -> Result<Value> {
        let ops = self.inlining.ok_or_else(|| self.unsupported("Inlineable"))?;
        Ok((ops.from_inlined)(payload))
    }
}

impl fmt::Debug for DatatypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatatypeDescriptor")
            .field("identifier", &self.identifier)
            .field("fixed_id", &self.fixed_id)
            .field("supertype", &self.supertype())
            .field("capabilities", &self.capabilities())
            .finish()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Composes the capability set of datatype `T`.
pub struct DescriptorBuilder<T> {
    descriptor: DatatypeDescriptor,
    _datatype: PhantomData<T>,
}

impl<T: LiteralDatatype> DescriptorBuilder<T> {
    pub fn logical(mut self) -> Self
    where
        T: Logical,
    {
        self.descriptor.logical = Some(erased_ebv::<T> as LogicalFn);
        self
    }

    pub fn numeric(mut self) -> Self
    where
        T: Numeric,
    {
        self.descriptor.numeric = Some(NumericOps {
            add: erased_add::<T>,
            sub: erased_sub::<T>,
            mul: erased_mul::<T>,
            div: erased_div::<T>,
            div_result: <T::DivResult as LiteralDatatype>::IDENTIFIER,
            abs: erased_abs::<T>,
            round: erased_round::<T>,
            floor: erased_floor::<T>,
            ceil: erased_ceil::<T>,
        });
        self
    }

    pub fn numeric_stub(mut self) -> Self
    where
        T: NumericStub,
    {
        self.descriptor.numeric_stub = Some(Conversion {
            target: <T::NumericImpl as LiteralDatatype>::IDENTIFIER,
            convert: erased_stub::<T>,
        });
        self
    }

    pub fn comparable(mut self) -> Self
    where
        T: Comparable,
    {
        self.descriptor.comparable = Some(erased_compare::<T> as CompareFn);
        self
    }

    pub fn subtype(mut self) -> Self
    where
        T: Subtype,
    {
        self.descriptor.subtype = Some(SubtypeOps {
            supertype: <T::Supertype as LiteralDatatype>::IDENTIFIER,
            from_supertype: erased_from_supertype::<T>,
            into_supertype: erased_into_supertype::<T>,
        });
        self
    }

    pub fn promotable(mut self) -> Self
    where
        T: Promotable,
    {
        self.descriptor.promotion = Some(Conversion {
            target: <T::Promoted as LiteralDatatype>::IDENTIFIER,
            convert: erased_promote::<T>,
        });
        self
    }

    pub fn double_promotable(mut self) -> Self
    where
        T: DoublePromotable,
    {
        self.descriptor.double_promotion = Some(erased_promote_double::<T> as UnaryFn);
        self
    }

    pub fn fixed_id(mut self) -> Self
    where
        T: FixedId,
    {
        self.descriptor.fixed_id = Some(T::FIXED_ID);
        self
    }

    /// Implies `fixed_id`.
    pub fn inlineable(mut self) -> Self
    where
        T: Inlineable,
    {
        self.descriptor.fixed_id = Some(T::FIXED_ID);
        self.descriptor.inlining = Some(InlineOps {
            try_into_inlined: erased_try_inline::<T>,
            from_inlined: erased_from_inlined::<T>,
        });
        self
    }

    pub fn build(self) -> DatatypeDescriptor {
        self.descriptor
    }
}

// ============================================================================
// Erasure shims
// ============================================================================

fn downcast<T: LiteralDatatype>(value: &Value) -> Result<&T::Repr> {
    T::Repr::from_value(value).ok_or_else(|| Error::TypeError {
        expected: T::IDENTIFIER.to_owned(),
        got: value.type_name().to_owned(),
    })
}

fn erased_from_string<T: LiteralDatatype>(s: &str) -> Result<Value> {
    T::from_string(s).map(ValueRepr::into_value)
}

fn erased_canonical<T: LiteralDatatype>(value: &Value) -> Result<String> {
    Ok(T::to_canonical_string(downcast::<T>(value)?))
}

fn erased_simplified<T: LiteralDatatype>(value: &Value) -> Result<String> {
    Ok(T::to_simplified_string(downcast::<T>(value)?))
}

fn erased_ebv<T: Logical>(value: &Value) -> Result<bool> {
    Ok(T::effective_boolean_value(downcast::<T>(value)?))
}

fn erased_compare<T: Comparable>(lhs: &Value, rhs: &Value) -> Result<Option<Ordering>> {
    Ok(T::compare(downcast::<T>(lhs)?, downcast::<T>(rhs)?))
}

fn erased_div<T: Numeric>(lhs: &Value, rhs: &Value) -> Result<Value> {
    T::div(downcast::<T>(lhs)?, downcast::<T>(rhs)?).map(ValueRepr::into_value)
}

fn erased_stub<T: NumericStub>(value: &Value) -> Result<Value> {
    Ok(T::into_numeric_impl(downcast::<T>(value)?).into_value())
}

fn erased_from_supertype<T: Subtype>(value: &Value) -> Result<Value> {
    T::from_supertype(downcast::<T::Supertype>(value)?).map(ValueRepr::into_value)
}

fn erased_into_supertype<T: Subtype>(value: &Value) -> Result<Value> {
    T::into_supertype(downcast::<T>(value)?).map(ValueRepr::into_value)
}

fn erased_promote<T: Promotable>(value: &Value) -> Result<Value> {
    T::promote(downcast::<T>(value)?).map(ValueRepr::into_value)
}

fn erased_promote_double<T: DoublePromotable>(value: &Value) -> Result<Value> {
    T::promote_to_double(downcast::<T>(value)?).map(Value::Double)
}

fn erased_try_inline<T: Inlineable>(value: &Value) -> Option<u64> {
    T::try_into_inlined(T::Repr::from_value(value)?)
}

fn erased_from_inlined<T: Inlineable>(payload: u64) -> Value {
    T::from_inlined(payload).into_value()
}

macro_rules! numeric_shims {
    (binary: $($bin:ident => $bin_op:ident),*; unary: $($un:ident => $un_op:ident),*) => {
        $(
            fn $bin<T: Numeric>(lhs: &Value, rhs: &Value) -> Result<Value> {
                T::$bin_op(downcast::<T>(lhs)?, downcast::<T>(rhs)?).map(ValueRepr::into_value)
            }
        )*
        $(
            fn $un<T: Numeric>(value: &Value) -> Result<Value> {
                T::$un_op(downcast::<T>(value)?).map(ValueRepr::into_value)
            }
        )*
    };
}

numeric_shims! {
    binary: erased_add => add, erased_sub => sub, erased_mul => mul;
    unary: erased_abs => abs, erased_round => round, erased_floor => floor, erased_ceil => ceil
}
