//! Assemblers turn one reflected node into one descriptor.
//!
//! The [`AssemblerFactory`] is a registry of [`Assembler`]s keyed by the kind
//! of reflected input they accept and the kind of descriptor they produce.
//! [`ProjectDescriptorBuilder`](crate::ProjectDescriptorBuilder) asks it for
//! a matching assembler every time a node has to be converted, so assemblers
//! for nested nodes (methods of a class, tags of a docblock) can be swapped
//! independently.

mod docblock;
mod file;
mod member;
mod namespace;
mod structure;
mod tag;

pub use docblock::assemble_docblock;
pub use file::FileAssembler;
pub use member::{
    ArgumentAssembler, ConstantAssembler, FunctionAssembler, MethodAssembler, PropertyAssembler,
};
pub use namespace::NamespaceAssembler;
pub use structure::{
    ClassAssembler, EnumAssembler, EnumCaseAssembler, InterfaceAssembler, TraitAssembler,
};
pub use tag::{TagAssembler, parse_tag};

use std::fmt;

use folio_core::descriptor::{
    ArgumentDescriptor, ClassDescriptor, ConstantDescriptor, Descriptor, DescriptorKind,
    EnumCaseDescriptor, EnumDescriptor, FileDescriptor, FunctionDescriptor, InterfaceDescriptor,
    MethodDescriptor, NamespaceDescriptor, PropertyDescriptor, TagDescriptor, TraitDescriptor,
};
use log::trace;

use crate::{
    ProjectDescriptorBuilder,
    error::{BuildError, Result},
    reflection,
};

/// The kind of a reflected node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectionKind {
    File,
    Namespace,
    Class,
    Interface,
    Trait,
    Enum,
    EnumCase,
    Constant,
    Function,
    Method,
    Property,
    Argument,
    Tag,
}

impl fmt::Display for ReflectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReflectionKind::File => "file",
            ReflectionKind::Namespace => "namespace",
            ReflectionKind::Class => "class",
            ReflectionKind::Interface => "interface",
            ReflectionKind::Trait => "trait",
            ReflectionKind::Enum => "enum",
            ReflectionKind::EnumCase => "enum case",
            ReflectionKind::Constant => "constant",
            ReflectionKind::Function => "function",
            ReflectionKind::Method => "method",
            ReflectionKind::Property => "property",
            ReflectionKind::Argument => "argument",
            ReflectionKind::Tag => "tag",
        };
        write!(f, "{name}")
    }
}

/// A borrowed reflected node of any kind.
#[derive(Debug, Clone, Copy)]
pub enum Reflected<'a> {
    File(&'a reflection::File),
    Namespace(&'a reflection::Namespace),
    Class(&'a reflection::Class),
    Interface(&'a reflection::Interface),
    Trait(&'a reflection::Trait),
    Enum(&'a reflection::Enum),
    EnumCase(&'a reflection::EnumCase),
    Constant(&'a reflection::Constant),
    Function(&'a reflection::Function),
    Method(&'a reflection::Method),
    Property(&'a reflection::Property),
    Argument(&'a reflection::Argument),
    Tag(&'a reflection::Tag),
}

impl Reflected<'_> {
    pub fn kind(&self) -> ReflectionKind {
        match self {
            Reflected::File(_) => ReflectionKind::File,
            Reflected::Namespace(_) => ReflectionKind::Namespace,
            Reflected::Class(_) => ReflectionKind::Class,
            Reflected::Interface(_) => ReflectionKind::Interface,
            Reflected::Trait(_) => ReflectionKind::Trait,
            Reflected::Enum(_) => ReflectionKind::Enum,
            Reflected::EnumCase(_) => ReflectionKind::EnumCase,
            Reflected::Constant(_) => ReflectionKind::Constant,
            Reflected::Function(_) => ReflectionKind::Function,
            Reflected::Method(_) => ReflectionKind::Method,
            Reflected::Property(_) => ReflectionKind::Property,
            Reflected::Argument(_) => ReflectionKind::Argument,
            Reflected::Tag(_) => ReflectionKind::Tag,
        }
    }
}

macro_rules! built {
    ($($variant:ident => $ty:ty),+ $(,)?) => {
        /// A freshly assembled descriptor, not yet part of any graph.
        #[derive(Debug)]
        pub enum Built {
            $($variant($ty),)+
            Argument(ArgumentDescriptor),
            Tag(TagDescriptor),
        }

        impl Built {
            pub fn kind(&self) -> DescriptorKind {
                match self {
                    $(Built::$variant(_) => DescriptorKind::$variant,)+
                    Built::Argument(_) => DescriptorKind::Argument,
                    Built::Tag(_) => DescriptorKind::Tag,
                }
            }

            /// The built descriptor, unless it is an argument or a tag.
            pub fn as_descriptor_mut(&mut self) -> Option<&mut dyn Descriptor> {
                match self {
                    $(Built::$variant(descriptor) => Some(descriptor),)+
                    Built::Argument(_) | Built::Tag(_) => None,
                }
            }
        }

        $(
            impl Assembled for $ty {
                const KIND: DescriptorKind = DescriptorKind::$variant;

                fn from_built(built: Built) -> Option<Self> {
                    match built {
                        Built::$variant(descriptor) => Some(descriptor),
                        _ => None,
                    }
                }
            }
        )+
    };
}

built! {
    File => FileDescriptor,
    Namespace => NamespaceDescriptor,
    Class => ClassDescriptor,
    Interface => InterfaceDescriptor,
    Trait => TraitDescriptor,
    Enum => EnumDescriptor,
    EnumCase => EnumCaseDescriptor,
    Constant => ConstantDescriptor,
    Function => FunctionDescriptor,
    Method => MethodDescriptor,
    Property => PropertyDescriptor,
}

/// A descriptor type that can be requested from the builder by type.
pub trait Assembled: Sized {
    const KIND: DescriptorKind;

    fn from_built(built: Built) -> Option<Self>;
}

impl Assembled for ArgumentDescriptor {
    const KIND: DescriptorKind = DescriptorKind::Argument;

    fn from_built(built: Built) -> Option<Self> {
        match built {
            Built::Argument(argument) => Some(argument),
            _ => None,
        }
    }
}

impl Assembled for TagDescriptor {
    const KIND: DescriptorKind = DescriptorKind::Tag;

    fn from_built(built: Built) -> Option<Self> {
        match built {
            Built::Tag(tag) => Some(tag),
            _ => None,
        }
    }
}

/// Converts one kind of reflected node into one kind of descriptor.
pub trait Assembler {
    /// The reflected node kind this assembler accepts.
    fn input(&self) -> ReflectionKind;

    /// The descriptor kind this assembler produces.
    fn output(&self) -> DescriptorKind;

    /// Creates the descriptor for `data`.
    ///
    /// Nested nodes are built through `builder` so they pass the same
    /// assembler lookup and filter chain.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`](crate::BuildError) when `data` carries an
    /// invalid FQSEN or a nested node cannot be built.
    fn create(&self, data: Reflected<'_>, builder: &ProjectDescriptorBuilder) -> Result<Built>;
}

/// The error returned by an assembler handed a node it does not accept.
fn unexpected_input(assembler: &dyn Assembler, data: Reflected<'_>) -> BuildError {
    BuildError::UnexpectedInput {
        expected: assembler.input(),
        actual: data.kind(),
    }
}

/// Registry of assemblers.
///
/// Lookups try the regular assemblers in registration order and then the
/// fallback assemblers.
pub struct AssemblerFactory {
    assemblers: Vec<Box<dyn Assembler>>,
    fallback_assemblers: Vec<Box<dyn Assembler>>,
}

impl AssemblerFactory {
    /// Creates an empty factory.
    pub fn new() -> Self {
        Self {
            assemblers: Vec::new(),
            fallback_assemblers: Vec::new(),
        }
    }

    /// Registers an assembler.
    pub fn register(&mut self, assembler: Box<dyn Assembler>) {
        trace!(input:% = assembler.input(), output:% = assembler.output(); "Registering assembler");
        self.assemblers.push(assembler);
    }

    /// Registers an assembler consulted only when no regular one matches.
    pub fn register_fallback(&mut self, assembler: Box<dyn Assembler>) {
        self.fallback_assemblers.push(assembler);
    }

    /// Returns the first assembler converting `input` into `output`.
    pub fn get(&self, input: ReflectionKind, output: DescriptorKind) -> Option<&dyn Assembler> {
        self.assemblers
            .iter()
            .chain(self.fallback_assemblers.iter())
            .find(|assembler| assembler.input() == input && assembler.output() == output)
            .map(|assembler| assembler.as_ref())
    }

    pub fn len(&self) -> usize {
        self.assemblers.len() + self.fallback_assemblers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for AssemblerFactory {
    /// A factory with an assembler for every reflected node kind.
    fn default() -> Self {
        let mut factory = Self::new();
        factory.register(Box::new(FileAssembler));
        factory.register(Box::new(NamespaceAssembler));
        factory.register(Box::new(ClassAssembler));
        factory.register(Box::new(InterfaceAssembler));
        factory.register(Box::new(TraitAssembler));
        factory.register(Box::new(EnumAssembler));
        factory.register(Box::new(EnumCaseAssembler));
        factory.register(Box::new(ConstantAssembler));
        factory.register(Box::new(FunctionAssembler));
        factory.register(Box::new(MethodAssembler));
        factory.register(Box::new(PropertyAssembler));
        factory.register(Box::new(ArgumentAssembler));
        factory.register(Box::new(TagAssembler));
        factory
    }
}
