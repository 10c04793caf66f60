//! The datatype registry.
//!
//! Built once from a fixed descriptor list and immutable afterwards. Besides
//! lookup it hosts the operations that span datatypes: arithmetic and
//! comparison across numeric types, and casts along the subtype forest.

use std::cmp::Ordering;

use hashbrown::HashMap;
use serde::Serialize;
use tracing::{debug, warn};

use super::capabilities::{Comparable, Inlineable, Logical, NumericStub, Subtype};
use super::descriptor::{DatatypeDescriptor, DescriptorBuilder, NumericOps};
use super::rdf::RdfLangString;
use super::value::Value;
use super::xsd::*;
use super::LiteralType;
use crate::{Error, Result};

/// A literal value paired with its datatype.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypedValue {
    pub datatype: &'static str,
    pub value: Value,
}

impl TypedValue {
    pub fn new(datatype: &'static str, value: impl Into<Value>) -> Self {
        Self {
            datatype,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Abs,
    Round,
    Floor,
    Ceil,
}

/// Capability set shared by every restriction of `xsd:integer`.
fn integer_subtype<T>(builder: DescriptorBuilder<T>) -> DatatypeDescriptor
where
    T: Logical + NumericStub + Comparable + Subtype + Inlineable,
{
    builder
        .logical()
        .numeric_stub()
        .comparable()
        .subtype()
        .inlineable()
        .build()
}

/// Every built-in datatype with its capability set.
fn builtin_descriptors() -> Vec<DatatypeDescriptor> {
    use super::descriptor::DatatypeDescriptor as D;

    vec![
        D::builder::<XsdString>().logical().comparable().fixed_id().build(),
        D::builder::<RdfLangString>().logical().comparable().build(),
        D::builder::<XsdBoolean>().logical().comparable().inlineable().build(),
        D::builder::<XsdDecimal>()
            .logical()
            .numeric()
            .comparable()
            .promotable()
            .double_promotable()
            .fixed_id()
            .build(),
        D::builder::<XsdInteger>()
            .logical()
            .numeric()
            .comparable()
            .subtype()
            .promotable()
            .double_promotable()
            .inlineable()
            .build(),
        integer_subtype(D::builder::<XsdNonPositiveInteger>()),
        integer_subtype(D::builder::<XsdNegativeInteger>()),
        integer_subtype(D::builder::<XsdNonNegativeInteger>()),
        integer_subtype(D::builder::<XsdPositiveInteger>()),
        integer_subtype(D::builder::<XsdLong>()),
        integer_subtype(D::builder::<XsdInt>()),
        integer_subtype(D::builder::<XsdShort>()),
        integer_subtype(D::builder::<XsdByte>()),
        integer_subtype(D::builder::<XsdUnsignedLong>()),
        integer_subtype(D::builder::<XsdUnsignedInt>()),
        integer_subtype(D::builder::<XsdUnsignedShort>()),
        integer_subtype(D::builder::<XsdUnsignedByte>()),
        D::builder::<XsdDouble>()
            .logical()
            .numeric()
            .comparable()
            .fixed_id()
            .build(),
        D::builder::<XsdFloat>()
            .logical()
            .numeric()
            .comparable()
            .promotable()
            .inlineable()
            .build(),
        D::builder::<XsdHexBinary>().fixed_id().build(),
    ]
}

/// Immutable set of registered datatypes.
#[derive(Debug, Clone)]
pub struct DatatypeRegistry {
    descriptors: Vec<DatatypeDescriptor>,
    by_iri: HashMap<&'static str, usize>,
    by_fixed_id: HashMap<LiteralType, usize>,
}

impl DatatypeRegistry {
    /// Registry of all built-in XSD and RDF datatypes.
    pub fn builtin() -> Result<Self> {
        Self::from_descriptors(builtin_descriptors())
    }

    /// Validates and indexes a descriptor list.
    ///
    /// Rejects duplicate IRIs and fixed ids, references (supertype, stub
    /// target, promotion target, division result) to unregistered
    /// datatypes, and cycles in the subtype or promotion graph.
    pub fn from_descriptors(descriptors: Vec<DatatypeDescriptor>) -> Result<Self> {
        Self::index(descriptors).inspect_err(|e| warn!(error = %e, "rejected datatype registry"))
    }

    fn index(descriptors: Vec<DatatypeDescriptor>) -> Result<Self> {
        let mut by_iri = HashMap::with_capacity(descriptors.len());
        let mut by_fixed_id = HashMap::new();

        for (idx, descriptor) in descriptors.iter().enumerate() {
            if by_iri.insert(descriptor.identifier(), idx).is_some() {
                return Err(Error::DuplicateDatatype(descriptor.identifier().to_owned()));
            }
            if let Some(fixed_id) = descriptor.fixed_id() {
                if !fixed_id.is_fixed() {
                    return Err(Error::InvalidRegistry(format!(
                        "{} uses the reserved fixed id {fixed_id}",
                        descriptor.identifier()
                    )));
                }
                if let Some(prev) = by_fixed_id.insert(fixed_id, idx) {
                    return Err(Error::DuplicateDatatype(format!(
                        "fixed id {fixed_id} of {} is already taken by {}",
                        descriptor.identifier(),
                        descriptors[prev].identifier()
                    )));
                }
            }
        }

        let registry = Self {
            descriptors,
            by_iri,
            by_fixed_id,
        };

        for descriptor in &registry.descriptors {
            let references = [
                descriptor.supertype(),
                descriptor.numeric_stub().map(|c| c.target),
                descriptor.promotion().map(|c| c.target),
                descriptor.numeric_ops().map(|ops| ops.div_result),
                descriptor.double_promotion().map(|_| DOUBLE),
            ];
            for target in references.into_iter().flatten() {
                registry.descriptor(target)?;
            }
            if let Some(stub) = descriptor.numeric_stub()
                && registry.descriptor(stub.target)?.numeric_ops().is_none()
            {
                return Err(Error::UnsupportedCapability {
                    datatype: stub.target.to_owned(),
                    capability: "Numeric",
                });
            }
            registry.check_acyclic(descriptor.identifier(), |d| d.supertype())?;
            registry.check_acyclic(descriptor.identifier(), |d| d.promotion().map(|c| c.target))?;
        }

        debug!(
            datatypes = registry.len(),
            fixed = registry.by_fixed_id.len(),
            "datatype registry initialized"
        );
        Ok(registry)
    }

    fn check_acyclic(
        &self,
        start: &'static str,
        next: impl Fn(&DatatypeDescriptor) -> Option<&'static str>,
    ) -> Result<()> {
        let mut current = start;
        for _ in 0..self.descriptors.len() {
            match self.get(current).and_then(&next) {
                Some(parent) if parent == start => break,
                Some(parent) => current = parent,
                None => return Ok(()),
            }
        }
        Err(Error::InvalidRegistry(format!(
            "datatype {start} leads into a cycle"
        )))
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    pub fn get(&self, iri: &str) -> Option<&DatatypeDescriptor> {
        self.by_iri.get(iri).map(|&idx| &self.descriptors[idx])
    }

    /// Like `get`, but an unknown IRI is an error.
    pub fn descriptor(&self, iri: &str) -> Result<&DatatypeDescriptor> {
        self.get(iri)
            .ok_or_else(|| Error::UnknownDatatype(iri.to_owned()))
    }

    pub fn get_by_fixed_id(&self, fixed_id: LiteralType) -> Option<&DatatypeDescriptor> {
        self.by_fixed_id.get(&fixed_id).map(|&idx| &self.descriptors[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &DatatypeDescriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Declared ancestors of `iri`, nearest first.
    pub fn supertypes(&self, iri: &str) -> Vec<&'static str> {
        let mut chain = Vec::new();
        let mut current = self.get(iri).and_then(|d| d.supertype());
        while let Some(parent) = current {
            chain.push(parent);
            current = self.get(parent).and_then(|d| d.supertype());
        }
        chain
    }

    /// Reflexive: every datatype is a subtype of itself.
    pub fn is_subtype_of(&self, sub: &str, sup: &str) -> bool {
        sub == sup || self.supertypes(sub).contains(&sup)
    }

    // ========================================================================
    // Single-datatype operations
    // ========================================================================

    pub fn parse(&self, datatype: &str, lexical: &str) -> Result<TypedValue> {
        let descriptor = self.descriptor(datatype)?;
        Ok(TypedValue {
            datatype: descriptor.identifier(),
            value: descriptor.from_string(lexical)?,
        })
    }

    pub fn canonical_string(&self, value: &TypedValue) -> Result<String> {
        self.descriptor(value.datatype)?.to_canonical_string(&value.value)
    }

    pub fn simplified_string(&self, value: &TypedValue) -> Result<String> {
        self.descriptor(value.datatype)?.to_simplified_string(&value.value)
    }

    pub fn effective_boolean_value(&self, value: &TypedValue) -> Result<bool> {
        self.descriptor(value.datatype)?.effective_boolean_value(&value.value)
    }

    // ========================================================================
    // Numeric unification
    // ========================================================================

    /// Moves a value to the datatype that implements its arithmetic.
    fn lower(&self, value: &TypedValue) -> Result<TypedValue> {
        let descriptor = self.descriptor(value.datatype)?;
        if descriptor.numeric_ops().is_some() {
            return Ok(value.clone());
        }
        match descriptor.numeric_stub() {
            Some(stub) => Ok(TypedValue {
                datatype: stub.target,
                value: (stub.convert)(&value.value)?,
            }),
            None => Err(Error::UnsupportedCapability {
                datatype: value.datatype.to_owned(),
                capability: "Numeric",
            }),
        }
    }

    /// `iri` followed by its promotion targets.
    fn promotion_chain(&self, iri: &'static str) -> Vec<&'static str> {
        let mut chain = vec![iri];
        let mut current = self.get(iri).and_then(|d| d.promotion());
        while let Some(step) = current {
            chain.push(step.target);
            current = self.get(step.target).and_then(|d| d.promotion());
        }
        chain
    }

    fn promote_to(&self, mut value: TypedValue, target: &'static str) -> Result<TypedValue> {
        while value.datatype != target {
            let descriptor = self.descriptor(value.datatype)?;
            if target == DOUBLE
                && let Some(to_double) = descriptor.double_promotion()
            {
                return Ok(TypedValue {
                    datatype: DOUBLE,
                    value: to_double(&value.value)?,
                });
            }

            let step = descriptor
                .promotion()
                .ok_or_else(|| Error::TypeError {
                    expected: target.to_owned(),
                    got: value.datatype.to_owned(),
                })?;
            value = TypedValue {
                datatype: step.target,
                value: (step.convert)(&value.value)?,
            };
        }
        Ok(value)
    }

    /// Lowers both operands and promotes them to their first common type.
    fn unify(&self, lhs: &TypedValue, rhs: &TypedValue) -> Result<(TypedValue, TypedValue)> {
        let lhs = self.lower(lhs)?;
        let rhs = self.lower(rhs)?;
        if lhs.datatype == rhs.datatype {
            return Ok((lhs, rhs));
        }

        let rhs_chain = self.promotion_chain(rhs.datatype);
        let common = self
            .promotion_chain(lhs.datatype)
            .into_iter()
            .find(|dt| rhs_chain.contains(dt))
            .ok_or_else(|| Error::TypeError {
                expected: lhs.datatype.to_owned(),
                got: rhs.datatype.to_owned(),
            })?;

        Ok((self.promote_to(lhs, common)?, self.promote_to(rhs, common)?))
    }

    fn numeric_ops(&self, iri: &str) -> Result<&NumericOps> {
        self.descriptor(iri)?
            .numeric_ops()
            .ok_or_else(|| Error::UnsupportedCapability {
                datatype: iri.to_owned(),
                capability: "Numeric",
            })
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    /// Mixed-type arithmetic. The result is typed by the operation: a
    /// constrained subtype's operands produce a value of the ancestor that
    /// implements the arithmetic, and the subtype's restriction is not
    /// re-checked (`positiveInteger 1 - positiveInteger 2` is
    /// `integer -1`).
    pub fn arithmetic(
        &self,
        op: ArithmeticOp,
        lhs: &TypedValue,
        rhs: &TypedValue,
    ) -> Result<TypedValue> {
        let (lhs, rhs) = self.unify(lhs, rhs)?;
        let ops = self.numeric_ops(lhs.datatype)?;
        let (apply, datatype) = match op {
            ArithmeticOp::Add => (ops.add, lhs.datatype),
            ArithmeticOp::Sub => (ops.sub, lhs.datatype),
            ArithmeticOp::Mul => (ops.mul, lhs.datatype),
            ArithmeticOp::Div => (ops.div, ops.div_result),
        };
        Ok(TypedValue {
            datatype,
            value: apply(&lhs.value, &rhs.value)?,
        })
    }

    pub fn add(&self, lhs: &TypedValue, rhs: &TypedValue) -> Result<TypedValue> {
        self.arithmetic(ArithmeticOp::Add, lhs, rhs)
    }

    pub fn sub(&self, lhs: &TypedValue, rhs: &TypedValue) -> Result<TypedValue> {
        self.arithmetic(ArithmeticOp::Sub, lhs, rhs)
    }

    pub fn mul(&self, lhs: &TypedValue, rhs: &TypedValue) -> Result<TypedValue> {
        self.arithmetic(ArithmeticOp::Mul, lhs, rhs)
    }

    pub fn div(&self, lhs: &TypedValue, rhs: &TypedValue) -> Result<TypedValue> {
        self.arithmetic(ArithmeticOp::Div, lhs, rhs)
    }

    pub fn unary(&self, op: UnaryOp, value: &TypedValue) -> Result<TypedValue> {
        let value = self.lower(value)?;
        let ops = self.numeric_ops(value.datatype)?;
        let apply = match op {
            UnaryOp::Abs => ops.abs,
            UnaryOp::Round => ops.round,
            UnaryOp::Floor => ops.floor,
            UnaryOp::Ceil => ops.ceil,
        };
        Ok(TypedValue {
            datatype: value.datatype,
            value: apply(&value.value)?,
        })
    }

    pub fn abs(&self, value: &TypedValue) -> Result<TypedValue> {
        self.unary(UnaryOp::Abs, value)
    }

    pub fn round(&self, value: &TypedValue) -> Result<TypedValue> {
        self.unary(UnaryOp::Round, value)
    }

    pub fn floor(&self, value: &TypedValue) -> Result<TypedValue> {
        self.unary(UnaryOp::Floor, value)
    }

    pub fn ceil(&self, value: &TypedValue) -> Result<TypedValue> {
        self.unary(UnaryOp::Ceil, value)
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    /// Three-way comparison. Values of one datatype use its own order;
    /// numeric values of different datatypes are unified first. `None`
    /// means unordered.
    pub fn compare(&self, lhs: &TypedValue, rhs: &TypedValue) -> Result<Option<Ordering>> {
        if lhs.datatype == rhs.datatype {
            return self
                .descriptor(lhs.datatype)?
                .compare(&lhs.value, &rhs.value);
        }

        let both_numeric = self.descriptor(lhs.datatype)?.is_numeric()
            && self.descriptor(rhs.datatype)?.is_numeric();
        if !both_numeric {
            return Err(Error::TypeError {
                expected: lhs.datatype.to_owned(),
                got: rhs.datatype.to_owned(),
            });
        }

        let (lhs, rhs) = self.unify(lhs, rhs)?;
        self.descriptor(lhs.datatype)?.compare(&lhs.value, &rhs.value)
    }

    // ========================================================================
    // Subtype casts
    // ========================================================================

    pub fn cast_to_supertype(&self, value: &TypedValue) -> Result<TypedValue> {
        let descriptor = self.descriptor(value.datatype)?;
        let ops = descriptor.subtype_ops().ok_or_else(|| Error::UnsupportedCapability {
            datatype: value.datatype.to_owned(),
            capability: "Subtype",
        })?;
        Ok(TypedValue {
            datatype: ops.supertype,
            value: descriptor.into_supertype(&value.value)?,
        })
    }

    /// Narrows `value` down the subtype forest to `target`, checking every
    /// restriction on the way.
    pub fn cast_to_subtype(&self, value: &TypedValue, target: &str) -> Result<TypedValue> {
        let target = self.descriptor(target)?;
        if target.identifier() == value.datatype {
            return Ok(value.clone());
        }

        let mut path = vec![target];
        for ancestor in self.supertypes(target.identifier()) {
            if ancestor == value.datatype {
                let mut current = value.value.clone();
                for step in path.iter().rev() {
                    current = step.from_supertype(&current)?;
                }
                return Ok(TypedValue {
                    datatype: target.identifier(),
                    value: current,
                });
            }
            path.push(self.descriptor(ancestor)?);
        }

        Err(Error::TypeError {
            expected: format!("a supertype of {}", target.identifier()),
            got: value.datatype.to_owned(),
        })
    }
}
