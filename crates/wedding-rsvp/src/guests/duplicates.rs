use super::domain::{GuestResponse, ResponseId};
use super::normalizer::NameKey;
use super::variants::{NameAlias, VariantGenerator};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Responses that matched the same group key, in the order they were scanned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    pub key: NameKey,
    pub members: Vec<ResponseId>,
}

impl DuplicateGroup {
    pub fn is_duplicate(&self) -> bool {
        self.members.len() > 1
    }
}

/// Groups and flags derived from one scan of a response list.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DuplicateReport {
    groups: Vec<DuplicateGroup>,
    flags: BTreeMap<ResponseId, bool>,
    #[serde(skip)]
    flagged_order: Vec<ResponseId>,
    #[serde(skip)]
    keys: HashMap<String, usize>,
}

impl DuplicateReport {
    /// Every group in first-seen order, singletons included.
    pub fn groups(&self) -> &[DuplicateGroup] {
        &self.groups
    }

    pub fn duplicate_groups(&self) -> impl Iterator<Item = &DuplicateGroup> {
        self.groups.iter().filter(|group| group.is_duplicate())
    }

    /// Name key to group lookup, as exposed to the dashboard for inspection.
    pub fn group_for_key(&self, key: &str) -> Option<&DuplicateGroup> {
        self.keys.get(key).map(|&index| &self.groups[index])
    }

    /// `id -> true` for every flagged response; unflagged ids are absent.
    pub fn flags(&self) -> &BTreeMap<ResponseId, bool> {
        &self.flags
    }

    pub fn is_flagged(&self, id: &ResponseId) -> bool {
        self.flags.contains_key(id)
    }

    /// Flagged ids in input order.
    pub fn flagged_ids(&self) -> &[ResponseId] {
        &self.flagged_order
    }

    pub fn flagged_count(&self) -> usize {
        self.flagged_order.len()
    }

    pub fn is_clean(&self) -> bool {
        self.flagged_order.is_empty()
    }
}

/// Groups guest responses whose names collide on any generated variant.
#[derive(Debug, Clone, Default)]
pub struct DuplicateDetector {
    variants: VariantGenerator,
}

impl DuplicateDetector {
    pub fn new(aliases: Vec<NameAlias>) -> Self {
        Self {
            variants: VariantGenerator::new(aliases),
        }
    }

    /// Scans `responses` in order. A record joins the group keyed by the first of its
    /// variants that is already a key; otherwise it opens a group under its raw full name.
    /// Flags are derived afterwards so every member of a multi-record group is flagged,
    /// including the record that opened it.
    pub fn detect(&self, responses: &[GuestResponse]) -> DuplicateReport {
        let mut groups: Vec<DuplicateGroup> = Vec::new();
        let mut keys: HashMap<String, usize> = HashMap::new();
        let mut assignments: Vec<usize> = Vec::with_capacity(responses.len());

        for response in responses {
            let variants = self
                .variants
                .generate(&response.first_name, &response.last_name);
            let matched = variants
                .iter()
                .find_map(|variant| keys.get(variant.as_str()).copied());

            let index = match matched {
                Some(index) => {
                    groups[index].members.push(response.id.clone());
                    index
                }
                None => {
                    let key = NameKey::from_parts(&response.first_name, &response.last_name);
                    let index = groups.len();
                    keys.insert(key.as_str().to_string(), index);
                    groups.push(DuplicateGroup {
                        key,
                        members: vec![response.id.clone()],
                    });
                    index
                }
            };
            assignments.push(index);
        }

        let flagged_order: Vec<ResponseId> = responses
            .iter()
            .zip(&assignments)
            .filter(|&(_, &index)| groups[index].is_duplicate())
            .map(|(response, _)| response.id.clone())
            .collect();
        let flags = flagged_order
            .iter()
            .map(|id| (id.clone(), true))
            .collect();

        DuplicateReport {
            groups,
            flags,
            flagged_order,
            keys,
        }
    }
}

/// Detects duplicates with no aliases configured.
pub fn find_duplicates(responses: &[GuestResponse]) -> DuplicateReport {
    DuplicateDetector::default().detect(responses)
}
