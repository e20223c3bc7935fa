//! Reflection adapter: the JSON shape written by the front end
//!
//! The front end reports visibility and staticness as independent boolean
//! predicates. They are turned into enumerated fields here, once, and never
//! reinterpreted downstream.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Deserialize;

use super::{
    namespace_of, normalize_name, ClassDescriptor, ClassKind, FunctionDescriptor, Member,
    MemberKind, Staticness, SymbolModel, TraitUse, Visibility,
};
use crate::error::ClassifyError;
use crate::namespace::SEPARATORS;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct RawModel {
    #[serde(default)]
    classes: Vec<RawClass>,
    #[serde(default)]
    functions: Vec<RawFunction>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawClass {
    name: String,
    #[serde(default)]
    kind: ClassKind,
    #[serde(default)]
    namespace: Option<String>,
    #[serde(default)]
    file: Option<PathBuf>,
    #[serde(default)]
    exception: bool,
    #[serde(default)]
    description: String,
    #[serde(default)]
    parent: Option<String>,
    #[serde(default)]
    interfaces: Vec<String>,
    #[serde(default)]
    constants: Vec<RawMember>,
    #[serde(default)]
    properties: Vec<RawMember>,
    #[serde(default)]
    methods: Vec<RawMember>,
    #[serde(default, rename = "inherited-constants")]
    inherited_constants: IndexMap<String, Vec<RawMember>>,
    #[serde(default, rename = "inherited-properties")]
    inherited_properties: IndexMap<String, Vec<RawMember>>,
    #[serde(default, rename = "inherited-methods")]
    inherited_methods: IndexMap<String, Vec<RawMember>>,
    #[serde(default)]
    traits: Vec<RawTraitUse>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTraitUse {
    name: String,
    #[serde(default)]
    properties: Vec<RawMember>,
    #[serde(default)]
    methods: Vec<RawMember>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMember {
    name: String,
    #[serde(default)]
    public: bool,
    #[serde(default)]
    protected: bool,
    #[serde(default)]
    private: bool,
    #[serde(default, rename = "static")]
    is_static: bool,
    #[serde(default)]
    value: Option<String>,
    #[serde(default, rename = "return-type")]
    return_type: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    line: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFunction {
    name: String,
    #[serde(default)]
    namespace: Option<String>,
    #[serde(default)]
    file: Option<PathBuf>,
    #[serde(default, rename = "return-type")]
    return_type: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    line: Option<u32>,
}

impl RawModel {
    pub(super) fn into_model(self) -> Result<SymbolModel, ClassifyError> {
        let classes = self
            .classes
            .into_iter()
            .map(RawClass::into_descriptor)
            .collect::<Result<Vec<_>, _>>()?;
        let functions = self.functions.into_iter().map(RawFunction::into_descriptor).collect();
        Ok(SymbolModel { classes, functions })
    }
}

impl RawClass {
    fn into_descriptor(self) -> Result<ClassDescriptor, ClassifyError> {
        let name = normalize_name(&self.name).to_string();
        let namespace = resolve_namespace(self.namespace.as_deref(), &name);

        let own = |raw: Vec<RawMember>, kind| members(raw, kind, &name, &name);
        let constants = own(self.constants, MemberKind::Constant)?;
        let properties = own(self.properties, MemberKind::Property)?;
        let methods = own(self.methods, MemberKind::Method)?;

        let inherited_constants = inherited(self.inherited_constants, MemberKind::Constant, &name)?;
        let inherited_properties = inherited(self.inherited_properties, MemberKind::Property, &name)?;
        let inherited_methods = inherited(self.inherited_methods, MemberKind::Method, &name)?;

        let traits = self
            .traits
            .into_iter()
            .map(|used| -> Result<TraitUse, ClassifyError> {
                let trait_name = normalize_name(&used.name).to_string();
                Ok(TraitUse {
                    properties: members(used.properties, MemberKind::Property, &trait_name, &name)?,
                    methods: members(used.methods, MemberKind::Method, &trait_name, &name)?,
                    name: trait_name,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ClassDescriptor {
            namespace,
            kind: self.kind,
            file: self.file,
            exception: self.exception,
            description: self.description,
            parent: self.parent.map(|p| normalize_name(&p).to_string()),
            interfaces: self
                .interfaces
                .iter()
                .map(|i| normalize_name(i).to_string())
                .collect(),
            constants,
            properties,
            methods,
            inherited_constants,
            inherited_properties,
            inherited_methods,
            traits,
            name,
        })
    }
}

impl RawFunction {
    fn into_descriptor(self) -> FunctionDescriptor {
        let name = normalize_name(&self.name).to_string();
        FunctionDescriptor {
            namespace: resolve_namespace(self.namespace.as_deref(), &name),
            file: self.file,
            return_type: self.return_type,
            description: self.description,
            line: self.line,
            name,
        }
    }
}

impl RawMember {
    fn into_member(self, kind: MemberKind, declaring: &str, owner: &str) -> Result<Member, ClassifyError> {
        let visibility = match (self.public, self.protected, self.private) {
            (true, false, false) => Visibility::Public,
            (false, true, false) => Visibility::Protected,
            (false, false, true) => Visibility::Private,
            (public, protected, private) => {
                return Err(ClassifyError::InvalidFlags {
                    kind,
                    member: self.name,
                    owner: owner.to_string(),
                    flags: format!("public={public} protected={protected} private={private}"),
                });
            }
        };
        let staticness = match kind {
            MemberKind::Constant => None,
            MemberKind::Property | MemberKind::Method if self.is_static => Some(Staticness::Static),
            MemberKind::Property | MemberKind::Method => Some(Staticness::Instance),
        };

        Ok(Member {
            name: self.name,
            kind,
            visibility,
            staticness,
            declaring: declaring.to_string(),
            value: self.value,
            return_type: self.return_type,
            description: self.description,
            line: self.line,
        })
    }
}

fn members(raw: Vec<RawMember>, kind: MemberKind, declaring: &str, owner: &str) -> Result<Vec<Member>, ClassifyError> {
    raw.into_iter()
        .map(|m| m.into_member(kind, declaring, owner))
        .collect()
}

fn inherited(
    raw: IndexMap<String, Vec<RawMember>>,
    kind: MemberKind,
    owner: &str,
) -> Result<IndexMap<String, Vec<Member>>, ClassifyError> {
    raw.into_iter()
        .map(|(ancestor, list)| -> Result<(String, Vec<Member>), ClassifyError> {
            let ancestor = normalize_name(&ancestor).to_string();
            let list = members(list, kind, &ancestor, owner)?;
            Ok((ancestor, list))
        })
        .collect()
}

fn resolve_namespace(declared: Option<&str>, name: &str) -> String {
    match declared.map(|ns| normalize_name(ns).trim_end_matches(SEPARATORS)) {
        Some(ns) if !ns.is_empty() => ns.to_string(),
        _ => namespace_of(name).to_string(),
    }
}
