//! Semantic service model definitions.
//!
//! This module contains the data structures describing a remote data
//! service: namespaces, classes of several kinds, properties, enumerations
//! and type aliases. The model is built once by an external metadata
//! reader, is immutable for the duration of a generation run, and drives
//! every naming, capability and emission decision downstream.

use std::fmt;

/// Namespace-qualified type name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FullName {
    /// Owning namespace (dotted identifier).
    pub namespace: String,
    /// Simple type name.
    pub name: String,
}

impl FullName {
    /// Creates a new qualified name.
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Splits a dotted string into namespace and simple name.
    ///
    /// The final segment becomes the simple name. Returns `None` when the
    /// string has no dot at all.
    #[must_use]
    pub fn parse(qualified: &str) -> Option<Self> {
        let idx = qualified.rfind('.')?;
        Some(Self::new(&qualified[..idx], &qualified[idx + 1..]))
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

/// Reference to a type from a property, key or base-type position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// Built-in primitive, identified by its semantic name ("String",
    /// "Int32", ...). Primitives are fixed and non-namespaced.
    Primitive(String),
    /// Reference to a class, enumeration or alias declared in the model.
    Named(FullName),
}

impl TypeRef {
    /// Creates a primitive reference.
    #[must_use]
    pub fn primitive(name: impl Into<String>) -> Self {
        Self::Primitive(name.into())
    }

    /// Creates a named reference.
    #[must_use]
    pub fn named(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Named(FullName::new(namespace, name))
    }

    /// Returns the qualified name used in markup attributes.
    ///
    /// Primitives render with the `Edm.` prefix, named references render
    /// as `Namespace.Name`.
    #[must_use]
    pub fn full_name(&self) -> String {
        match self {
            Self::Primitive(name) => format!("Edm.{name}"),
            Self::Named(full) => full.to_string(),
        }
    }

    /// Returns the named target, if this is not a primitive.
    #[must_use]
    pub fn as_named(&self) -> Option<&FullName> {
        match self {
            Self::Primitive(_) => None,
            Self::Named(full) => Some(full),
        }
    }
}

/// Class kind, fixing which property and method shapes are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    /// Value type without identity, key or CRUD surface.
    Complex,
    /// Queryable, addressable type participating in navigation.
    Entity,
    /// Entity that additionally carries a binary stream.
    MediaEntity,
    /// The logical service root; its properties are entity sets and
    /// singletons, never plain data.
    Service,
}

impl ClassKind {
    /// Returns true for Entity and MediaEntity.
    #[must_use]
    pub const fn is_entity_kind(self) -> bool {
        matches!(self, Self::Entity | Self::MediaEntity)
    }

    /// Kind name as it appears in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Complex => "Complex",
            Self::Entity => "Entity",
            Self::MediaEntity => "MediaEntity",
            Self::Service => "Service",
        }
    }
}

/// Declared visibility of a generated member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// Publicly visible.
    #[default]
    Public,
    /// Assembly-internal.
    Internal,
    /// Visible to subclasses.
    Protected,
    /// Private to the declaring type.
    Private,
}

impl Visibility {
    /// Returns the C# access keyword.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Internal => "internal",
            Self::Protected => "protected",
            Self::Private => "private",
        }
    }
}

/// Property of a class.
///
/// A property is implicitly a navigation property when its owning class is
/// Entity-kind and its type resolves to another Entity-kind class; that
/// classification lives on [`Model::is_navigation`] because it needs the
/// whole model to resolve the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Property name.
    pub name: String,
    /// Referenced type.
    pub type_ref: TypeRef,
    /// True when the declared type is `Collection(T)`.
    pub is_collection: bool,
}

impl Property {
    /// Creates a scalar property.
    #[must_use]
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            is_collection: false,
        }
    }

    /// Creates a collection property.
    #[must_use]
    pub fn collection(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            is_collection: true,
        }
    }
}

/// Class declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Class {
    /// Class name.
    pub name: String,
    /// Owning namespace name.
    pub namespace: String,
    /// Class kind.
    pub kind: ClassKind,
    /// Base class, if any. Chains must stay finite and acyclic.
    pub base_type: Option<FullName>,
    /// Abstract classes are never directly addressable or mutable.
    pub is_abstract: bool,
    /// Open classes accept undeclared properties.
    pub is_open: bool,
    /// Declared properties, in declaration order.
    pub properties: Vec<Property>,
    /// Names of key properties, in key declaration order. Only meaningful
    /// for Entity and MediaEntity; empty means non-addressable by key.
    pub key: Vec<String>,
}

impl Class {
    /// Creates a new class with no properties and no key.
    #[must_use]
    pub fn new(name: impl Into<String>, namespace: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            kind,
            base_type: None,
            is_abstract: false,
            is_open: false,
            properties: Vec::new(),
            key: Vec::new(),
        }
    }

    /// Adds a property in declaration order.
    pub fn add_property(&mut self, property: Property) {
        self.properties.push(property);
    }

    /// Returns the qualified name of this class.
    #[must_use]
    pub fn full_name(&self) -> FullName {
        FullName::new(self.namespace.clone(), self.name.clone())
    }

    /// Looks up a declared property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Returns the key properties in key declaration order.
    ///
    /// Key names without a matching declared property are skipped; the
    /// validation pass reports them.
    pub fn key_properties(&self) -> impl Iterator<Item = &Property> {
        self.key.iter().filter_map(|name| self.property(name))
    }

    /// True when this class carries a binary stream.
    #[must_use]
    pub const fn has_stream(&self) -> bool {
        matches!(self.kind, ClassKind::MediaEntity)
    }
}

/// Enumeration member. Underlying values are not modeled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    /// Member name.
    pub name: String,
}

impl EnumMember {
    /// Creates a new member.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Enumeration declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    /// Enumeration name.
    pub name: String,
    /// Owning namespace name.
    pub namespace: String,
    /// Members in declaration order.
    pub members: Vec<EnumMember>,
}

impl EnumType {
    /// Creates a new enumeration with no members.
    #[must_use]
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            members: Vec::new(),
        }
    }

    /// Adds a member in declaration order.
    pub fn add_member(&mut self, member: EnumMember) {
        self.members.push(member);
    }
}

/// Named alias over another type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeAlias {
    /// Alias name.
    pub name: String,
    /// Owning namespace name.
    pub namespace: String,
    /// Aliased type.
    pub base_type: TypeRef,
    /// Open aliases accept undeclared properties.
    pub is_open: bool,
    /// Whether the alias admits null.
    pub is_nullable: bool,
}

impl TypeAlias {
    /// Creates a new alias.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        base_type: TypeRef,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            base_type,
            is_open: false,
            is_nullable: false,
        }
    }
}

/// Namespace declaration. Insertion order of children is significant: it
/// drives emission order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Namespace {
    /// Namespace name (dotted identifier).
    pub name: String,
    /// Classes in declaration order.
    pub classes: Vec<Class>,
    /// Enumerations in declaration order.
    pub enums: Vec<EnumType>,
    /// Type aliases in declaration order.
    pub aliases: Vec<TypeAlias>,
}

impl Namespace {
    /// Creates a new empty namespace.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            classes: Vec::new(),
            enums: Vec::new(),
            aliases: Vec::new(),
        }
    }

    /// Adds a class in declaration order.
    pub fn add_class(&mut self, class: Class) {
        self.classes.push(class);
    }

    /// Adds an enumeration in declaration order.
    pub fn add_enum(&mut self, enum_type: EnumType) {
        self.enums.push(enum_type);
    }

    /// Adds a type alias in declaration order.
    pub fn add_alias(&mut self, alias: TypeAlias) {
        self.aliases.push(alias);
    }
}

/// Complete semantic model of a service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Model {
    /// Namespaces in declaration order.
    pub namespaces: Vec<Namespace>,
}

impl Model {
    /// Creates a new empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a namespace in declaration order.
    pub fn add_namespace(&mut self, namespace: Namespace) {
        self.namespaces.push(namespace);
    }

    /// Looks up a namespace by name.
    #[must_use]
    pub fn namespace(&self, name: &str) -> Option<&Namespace> {
        self.namespaces.iter().find(|ns| ns.name == name)
    }

    /// Looks up a class by qualified name.
    #[must_use]
    pub fn class(&self, full: &FullName) -> Option<&Class> {
        self.namespace(&full.namespace)?
            .classes
            .iter()
            .find(|c| c.name == full.name)
    }

    /// Looks up an enumeration by qualified name.
    #[must_use]
    pub fn enum_type(&self, full: &FullName) -> Option<&EnumType> {
        self.namespace(&full.namespace)?
            .enums
            .iter()
            .find(|e| e.name == full.name)
    }

    /// Looks up a type alias by qualified name.
    #[must_use]
    pub fn alias(&self, full: &FullName) -> Option<&TypeAlias> {
        self.namespace(&full.namespace)?
            .aliases
            .iter()
            .find(|a| a.name == full.name)
    }

    /// True when the reference resolves to an Entity-kind class.
    #[must_use]
    pub fn is_entity_ref(&self, type_ref: &TypeRef) -> bool {
        type_ref
            .as_named()
            .and_then(|full| self.class(full))
            .is_some_and(|c| c.kind.is_entity_kind())
    }

    /// Classifies a property as navigation or plain data.
    ///
    /// Navigation requires an Entity-kind owner and an Entity-kind target.
    #[must_use]
    pub fn is_navigation(&self, owner: &Class, property: &Property) -> bool {
        owner.kind.is_entity_kind() && self.is_entity_ref(&property.type_ref)
    }
}
