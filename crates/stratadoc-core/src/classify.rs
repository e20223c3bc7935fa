//! Member classification
//!
//! Sorts a class's own, inherited and trait-contributed members into a
//! fixed nested structure: origin, then staticness (not for constants),
//! then visibility. Each member is read once and lands in exactly one leaf,
//! in the order it was discovered.

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::ClassifyError;
use crate::model::{ClassDescriptor, Member, MemberKind, Staticness, Visibility};

/// Own members of one kind, split by visibility
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VisibilityBuckets<'a> {
    pub public: Vec<&'a Member>,
    pub protected: Vec<&'a Member>,
    pub private: Vec<&'a Member>,
}

impl<'a> VisibilityBuckets<'a> {
    fn push(&mut self, member: &'a Member) {
        match member.visibility {
            Visibility::Public => self.public.push(member),
            Visibility::Protected => self.protected.push(member),
            Visibility::Private => self.private.push(member),
        }
    }

    pub fn len(&self) -> usize {
        self.public.len() + self.protected.len() + self.private.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Inherited members of one kind. Private members are never inherited, so
/// there is no private leaf.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InheritedBuckets<'a> {
    pub public: Vec<&'a Member>,
    pub protected: Vec<&'a Member>,
}

impl<'a> InheritedBuckets<'a> {
    fn push(&mut self, member: &'a Member, owner: &str, ancestor: &str) -> Result<(), ClassifyError> {
        match member.visibility {
            Visibility::Public => self.public.push(member),
            Visibility::Protected => self.protected.push(member),
            Visibility::Private => {
                return Err(ClassifyError::PrivateInherited {
                    kind: member.kind,
                    member: member.name.clone(),
                    owner: owner.to_string(),
                    ancestor: ancestor.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.public.len() + self.protected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Static and instance halves of a property or method bucket
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScopeBuckets<B> {
    #[serde(rename = "static")]
    pub static_members: B,
    pub instance: B,
}

impl<B> ScopeBuckets<B> {
    fn side(&mut self, member: &Member, owner: &str) -> Result<&mut B, ClassifyError> {
        match member.staticness {
            Some(Staticness::Static) => Ok(&mut self.static_members),
            Some(Staticness::Instance) => Ok(&mut self.instance),
            None => Err(ClassifyError::InvalidFlags {
                kind: member.kind,
                member: member.name.clone(),
                owner: owner.to_string(),
                flags: "missing static/instance flag".to_string(),
            }),
        }
    }
}

/// Categorized view of a class's members, ready for rendering
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MemberBucket<'a> {
    pub constants: VisibilityBuckets<'a>,
    pub inherited_constants: InheritedBuckets<'a>,
    pub properties: ScopeBuckets<VisibilityBuckets<'a>>,
    pub inherited_properties: ScopeBuckets<InheritedBuckets<'a>>,
    pub methods: ScopeBuckets<VisibilityBuckets<'a>>,
    pub inherited_methods: ScopeBuckets<InheritedBuckets<'a>>,
    /// Every trait the class uses, in declaration order, even when the
    /// trait contributes no documented members
    pub traits: Vec<&'a str>,
    /// Trait name -> properties declared by that trait (non-empty only)
    pub trait_properties: IndexMap<&'a str, Vec<&'a Member>>,
    /// Trait name -> methods declared by that trait (non-empty only)
    pub trait_methods: IndexMap<&'a str, Vec<&'a Member>>,
}

impl MemberBucket<'_> {
    /// Number of members classified, across all origins
    pub fn len(&self) -> usize {
        self.constants.len()
            + self.inherited_constants.len()
            + self.properties.static_members.len()
            + self.properties.instance.len()
            + self.inherited_properties.static_members.len()
            + self.inherited_properties.instance.len()
            + self.methods.static_members.len()
            + self.methods.instance.len()
            + self.inherited_methods.static_members.len()
            + self.inherited_methods.instance.len()
            + self.trait_properties.values().map(Vec::len).sum::<usize>()
            + self.trait_methods.values().map(Vec::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Classify every member of `class`.
///
/// # Errors
///
/// Fails with [`ClassifyError::PrivateInherited`] when the reflection data
/// reports a private member as inherited, and with
/// [`ClassifyError::InvalidFlags`] when a property or method carries no
/// staticness.
pub fn classify(class: &ClassDescriptor) -> Result<MemberBucket<'_>, ClassifyError> {
    let owner = class.name.as_str();

    let mut constants = VisibilityBuckets::default();
    for constant in &class.constants {
        expect_kind(constant, MemberKind::Constant, owner)?;
        constants.push(constant);
    }

    let mut inherited_constants = InheritedBuckets::default();
    for (ancestor, list) in &class.inherited_constants {
        for constant in list {
            expect_kind(constant, MemberKind::Constant, owner)?;
            inherited_constants.push(constant, owner, ancestor)?;
        }
    }

    let properties = own_scoped(&class.properties, MemberKind::Property, owner)?;
    let inherited_properties = inherited_scoped(&class.inherited_properties, MemberKind::Property, owner)?;
    let methods = own_scoped(&class.methods, MemberKind::Method, owner)?;
    let inherited_methods = inherited_scoped(&class.inherited_methods, MemberKind::Method, owner)?;

    let mut traits = Vec::with_capacity(class.traits.len());
    let mut trait_properties = IndexMap::new();
    let mut trait_methods = IndexMap::new();
    for used in &class.traits {
        let name = used.name.as_str();
        traits.push(name);
        collect_trait_members(&mut trait_properties, name, &used.properties, MemberKind::Property, owner)?;
        collect_trait_members(&mut trait_methods, name, &used.methods, MemberKind::Method, owner)?;
    }

    let bucket = MemberBucket {
        constants,
        inherited_constants,
        properties,
        inherited_properties,
        methods,
        inherited_methods,
        traits,
        trait_properties,
        trait_methods,
    };
    tracing::trace!(class = owner, members = bucket.len(), "classified members");
    Ok(bucket)
}

fn own_scoped<'a>(
    members: &'a [Member],
    kind: MemberKind,
    owner: &str,
) -> Result<ScopeBuckets<VisibilityBuckets<'a>>, ClassifyError> {
    let mut buckets = ScopeBuckets::<VisibilityBuckets<'a>>::default();
    for member in members {
        expect_kind(member, kind, owner)?;
        buckets.side(member, owner)?.push(member);
    }
    Ok(buckets)
}

fn inherited_scoped<'a>(
    members: &'a IndexMap<String, Vec<Member>>,
    kind: MemberKind,
    owner: &str,
) -> Result<ScopeBuckets<InheritedBuckets<'a>>, ClassifyError> {
    let mut buckets = ScopeBuckets::<InheritedBuckets<'a>>::default();
    for (ancestor, list) in members {
        for member in list {
            expect_kind(member, kind, owner)?;
            buckets.side(member, owner)?.push(member, owner, ancestor)?;
        }
    }
    Ok(buckets)
}

/// Traits that contribute nothing of `kind` get no entry; the class's use of
/// the trait is still recorded in [`MemberBucket::traits`].
fn collect_trait_members<'a>(
    into: &mut IndexMap<&'a str, Vec<&'a Member>>,
    trait_name: &'a str,
    members: &'a [Member],
    kind: MemberKind,
    owner: &str,
) -> Result<(), ClassifyError> {
    if members.is_empty() {
        return Ok(());
    }
    let entry = into.entry(trait_name).or_default();
    for member in members {
        expect_kind(member, kind, owner)?;
        entry.push(member);
    }
    Ok(())
}

fn expect_kind(member: &Member, kind: MemberKind, owner: &str) -> Result<(), ClassifyError> {
    if member.kind == kind {
        Ok(())
    } else {
        Err(ClassifyError::InvalidFlags {
            kind,
            member: member.name.clone(),
            owner: owner.to_string(),
            flags: format!("reported as {} in the {} list", member.kind, kind),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClassKind, TraitUse};

    use crate::model::Staticness::{Instance, Static};
    use crate::model::Visibility::{Private, Protected, Public};

    fn names(members: &[&Member]) -> Vec<String> {
        members.iter().map(|m| m.name.clone()).collect()
    }

    fn sample_class() -> ClassDescriptor {
        let mut class = ClassDescriptor::new("App\\Cache\\Store", ClassKind::Class);
        class.constants = vec![
            Member::constant("TTL", Public, "App\\Cache\\Store"),
            Member::constant("PREFIX", Protected, "App\\Cache\\Store"),
            Member::constant("SALT", Private, "App\\Cache\\Store"),
            Member::constant("VERSION", Public, "App\\Cache\\Store"),
        ];
        class.properties = vec![
            Member::property("instances", Private, Static, "App\\Cache\\Store"),
            Member::property("items", Protected, Instance, "App\\Cache\\Store"),
            Member::property("name", Public, Instance, "App\\Cache\\Store"),
        ];
        class.methods = vec![
            Member::method("create", Public, Static, "App\\Cache\\Store"),
            Member::method("get", Public, Instance, "App\\Cache\\Store"),
            Member::method("set", Public, Instance, "App\\Cache\\Store"),
            Member::method("evict", Private, Instance, "App\\Cache\\Store"),
        ];
        class
    }

    #[test]
    fn test_own_members_land_in_matching_leaf() {
        let class = sample_class();
        let bucket = classify(&class).unwrap();

        assert_eq!(names(&bucket.constants.public), vec!["TTL", "VERSION"]);
        assert_eq!(names(&bucket.constants.protected), vec!["PREFIX"]);
        assert_eq!(names(&bucket.constants.private), vec!["SALT"]);

        assert_eq!(names(&bucket.properties.static_members.private), vec!["instances"]);
        assert_eq!(names(&bucket.properties.instance.protected), vec!["items"]);
        assert_eq!(names(&bucket.properties.instance.public), vec!["name"]);
        assert!(bucket.properties.static_members.public.is_empty());

        assert_eq!(names(&bucket.methods.static_members.public), vec!["create"]);
        assert_eq!(names(&bucket.methods.instance.public), vec!["get", "set"]);
        assert_eq!(names(&bucket.methods.instance.private), vec!["evict"]);
    }

    #[test]
    fn test_every_own_member_appears_exactly_once() {
        let class = sample_class();
        let bucket = classify(&class).unwrap();
        let total = class.constants.len() + class.properties.len() + class.methods.len();
        assert_eq!(bucket.len(), total);

        for member in class.properties.iter().chain(&class.methods) {
            let scoped = match member.kind {
                MemberKind::Property => &bucket.properties,
                _ => &bucket.methods,
            };
            let hits = [&scoped.static_members, &scoped.instance]
                .into_iter()
                .flat_map(|b| b.public.iter().chain(&b.protected).chain(&b.private))
                .filter(|m| std::ptr::eq(**m, member))
                .count();
            assert_eq!(hits, 1, "{} should be in exactly one leaf", member.name);
        }
    }

    #[test]
    fn test_inherited_members_keep_ancestor_order() {
        let mut class = ClassDescriptor::new("App\\Child", ClassKind::Class);
        class.inherited_methods.insert(
            "App\\Parent".to_string(),
            vec![
                Member::method("save", Public, Instance, "App\\Parent"),
                Member::method("validate", Protected, Instance, "App\\Parent"),
            ],
        );
        class.inherited_methods.insert(
            "App\\Grandparent".to_string(),
            vec![
                Member::method("boot", Public, Static, "App\\Grandparent"),
                Member::method("load", Public, Instance, "App\\Grandparent"),
            ],
        );
        class.inherited_constants.insert(
            "App\\Parent".to_string(),
            vec![Member::constant("LIMIT", Protected, "App\\Parent")],
        );

        let bucket = classify(&class).unwrap();
        assert_eq!(names(&bucket.inherited_methods.instance.public), vec!["save", "load"]);
        assert_eq!(names(&bucket.inherited_methods.instance.protected), vec!["validate"]);
        assert_eq!(names(&bucket.inherited_methods.static_members.public), vec!["boot"]);
        assert_eq!(names(&bucket.inherited_constants.protected), vec!["LIMIT"]);
        assert_eq!(bucket.inherited_methods.instance.public[1].declaring, "App\\Grandparent");
    }

    #[test]
    fn test_private_inherited_constant_is_rejected() {
        let mut class = ClassDescriptor::new("App\\Child", ClassKind::Class);
        class.inherited_constants.insert(
            "App\\Base".to_string(),
            vec![
                Member::constant("OPEN", Public, "App\\Base"),
                Member::constant("SECRET", Private, "App\\Base"),
            ],
        );

        let err = classify(&class).unwrap_err();
        assert_eq!(
            err,
            ClassifyError::PrivateInherited {
                kind: MemberKind::Constant,
                member: "SECRET".to_string(),
                owner: "App\\Child".to_string(),
                ancestor: "App\\Base".to_string(),
            }
        );
    }

    #[test]
    fn test_private_inherited_property_is_rejected() {
        let mut class = ClassDescriptor::new("App\\Child", ClassKind::Class);
        class.inherited_properties.insert(
            "App\\Base".to_string(),
            vec![Member::property("cache", Private, Static, "App\\Base")],
        );
        assert!(matches!(
            classify(&class),
            Err(ClassifyError::PrivateInherited { kind: MemberKind::Property, .. })
        ));
    }

    #[test]
    fn test_private_inherited_method_is_rejected() {
        let mut class = ClassDescriptor::new("App\\Child", ClassKind::Class);
        class.inherited_methods.insert(
            "App\\Base".to_string(),
            vec![Member::method("reset", Private, Instance, "App\\Base")],
        );
        assert!(matches!(
            classify(&class),
            Err(ClassifyError::PrivateInherited { kind: MemberKind::Method, .. })
        ));

        class.inherited_methods.insert(
            "App\\Base".to_string(),
            vec![
                Member::method("boot", Public, Static, "App\\Base"),
                Member::method("reset", Protected, Instance, "App\\Base"),
            ],
        );
        let bucket = classify(&class).unwrap();
        assert_eq!(bucket.inherited_methods.static_members.public[0].name, "boot");
        assert_eq!(bucket.inherited_methods.instance.protected[0].name, "reset");
    }

    #[test]
    fn test_missing_staticness_is_a_fault() {
        let mut class = ClassDescriptor::new("App\\Foo", ClassKind::Class);
        class.methods = vec![Member::new("run", MemberKind::Method, Public, None, "App\\Foo")];
        match classify(&class) {
            Err(ClassifyError::InvalidFlags { member, owner, .. }) => {
                assert_eq!(member, "run");
                assert_eq!(owner, "App\\Foo");
            }
            other => panic!("expected InvalidFlags, got {other:?}"),
        }
    }

    #[test]
    fn test_member_in_wrong_list_is_a_fault() {
        let mut class = ClassDescriptor::new("App\\Foo", ClassKind::Class);
        class.properties = vec![Member::method("run", Public, Instance, "App\\Foo")];
        assert!(matches!(classify(&class), Err(ClassifyError::InvalidFlags { .. })));
    }

    #[test]
    fn test_trait_without_properties_has_no_property_entry() {
        let mut class = ClassDescriptor::new("App\\Logger", ClassKind::Class);
        let mut loggable = TraitUse::new("App\\Loggable");
        loggable.methods.push(Member::method("log", Public, Instance, "App\\Loggable"));
        class.traits.push(loggable);

        let bucket = classify(&class).unwrap();
        assert!(!bucket.trait_properties.contains_key("App\\Loggable"));
        assert_eq!(bucket.trait_methods.len(), 1);
        assert_eq!(names(&bucket.trait_methods["App\\Loggable"]), vec!["log"]);
        assert_eq!(bucket.traits, vec!["App\\Loggable"]);
    }

    #[test]
    fn test_empty_trait_is_still_recorded() {
        let mut class = ClassDescriptor::new("App\\Marker", ClassKind::Class);
        class.traits.push(TraitUse::new("App\\Tagged"));
        let mut counted = TraitUse::new("App\\Counted");
        counted.properties.push(Member::property("count", Protected, Static, "App\\Counted"));
        class.traits.push(counted);

        let bucket = classify(&class).unwrap();
        assert_eq!(bucket.traits, vec!["App\\Tagged", "App\\Counted"]);
        assert!(bucket.trait_methods.is_empty());
        assert_eq!(bucket.trait_properties.keys().copied().collect::<Vec<_>>(), vec!["App\\Counted"]);
    }

    #[test]
    fn test_trait_members_are_not_folded_into_own() {
        let mut class = ClassDescriptor::new("App\\Logger", ClassKind::Class);
        let mut loggable = TraitUse::new("App\\Loggable");
        loggable.methods.push(Member::method("log", Public, Instance, "App\\Loggable"));
        class.traits.push(loggable);

        let bucket = classify(&class).unwrap();
        assert!(bucket.methods.instance.is_empty());
    }
}
