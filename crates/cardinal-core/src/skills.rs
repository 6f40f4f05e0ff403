use std::collections::BTreeMap;

use contracts::{
    Attribute, GameError, Skill, SkillFlag, SkillRequirement, SCHEMA_VERSION_V1,
};

/// Skill definitions with sequential ids and case-insensitively unique names.
#[derive(Debug, Default)]
pub struct SkillCatalog {
    skills: BTreeMap<u64, Skill>,
    next_skill_id: u64,
    id_by_lowercase_name: BTreeMap<String, u64>,
}

impl SkillCatalog {
    pub fn create(
        &mut self,
        name: &str,
        flag: SkillFlag,
        now: u64,
    ) -> Result<&Skill, GameError> {
        let key = name.to_lowercase();
        if self.id_by_lowercase_name.contains_key(&key) {
            return Err(GameError::DuplicateName(name.to_string()));
        }

        let skill_id = self.next_skill_id;
        self.next_skill_id += 1;
        self.id_by_lowercase_name.insert(key, skill_id);
        let skill = self.skills.entry(skill_id).or_insert(Skill {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            skill_id,
            name: name.to_string(),
            flag,
            requirement: None,
            created_at: now,
        });
        Ok(skill)
    }

    /// Attaches the gating rule. Upsert: repeating the call overwrites the
    /// previous requirement for the same skill.
    pub fn set_requirement(
        &mut self,
        skill_id: u64,
        attribute: Attribute,
        min_value: u64,
    ) -> Result<(), GameError> {
        let skill = self.skills.get_mut(&skill_id).ok_or(GameError::NotFound)?;
        skill.requirement = Some(SkillRequirement {
            attribute,
            min_value,
        });
        Ok(())
    }

    pub fn get(&self, skill_id: u64) -> Result<&Skill, GameError> {
        self.skills.get(&skill_id).ok_or(GameError::NotFound)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}
