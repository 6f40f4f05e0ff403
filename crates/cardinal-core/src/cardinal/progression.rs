use contracts::{Attribute, SkillFlag};

use super::*;

impl Cardinal {
    pub fn create_new_skill(
        &mut self,
        caller: &str,
        name: &str,
        flag: SkillFlag,
        now: u64,
    ) -> Result<Skill, GameError> {
        self.access.require_role(Role::GameMaster, caller)?;
        let skill = self.skills.create(name, flag, now)?.clone();
        self.push_notification(
            NotificationKind::NewSkill,
            now,
            json!({
                "skill_id": skill.skill_id,
                "name": skill.name,
                "flag": skill.flag,
                "timestamp": now,
            }),
        );
        Ok(skill)
    }

    pub fn set_skill_requirement(
        &mut self,
        caller: &str,
        skill_id: u64,
        attribute: Attribute,
        min_value: u64,
        now: u64,
    ) -> Result<(), GameError> {
        self.access.require_role(Role::GameMaster, caller)?;
        self.skills.set_requirement(skill_id, attribute, min_value)?;
        self.push_notification(
            NotificationKind::SkillRequirementSet,
            now,
            json!({
                "skill_id": skill_id,
                "attribute": attribute,
                "min_value": min_value,
            }),
        );
        Ok(())
    }

    /// Learning an already-known skill is a redundant success: returns
    /// `Ok(false)` and changes nothing.
    pub fn learn_skill(
        &mut self,
        caller: &str,
        avatar_id: u64,
        skill_id: u64,
        now: u64,
    ) -> Result<bool, GameError> {
        let avatar = self.avatars.require_owner(avatar_id, caller)?;
        let skill = self.skills.get(skill_id)?;
        if let Some(requirement) = skill.requirement {
            if avatar.attribute(requirement.attribute) < requirement.min_value {
                return Err(GameError::RequirementNotMet);
            }
        }

        let newly_learned = self
            .avatars
            .get_mut(avatar_id)?
            .learned_skills
            .insert(skill_id);
        if newly_learned {
            self.push_notification(
                NotificationKind::SkillLearned,
                now,
                json!({ "avatar_id": avatar_id, "skill_id": skill_id }),
            );
        }
        Ok(newly_learned)
    }

    pub fn add_attribute_points(
        &mut self,
        caller: &str,
        avatar_id: u64,
        amount: u64,
        now: u64,
    ) -> Result<u64, GameError> {
        self.access.require_role(Role::GameMaster, caller)?;
        let balance = self.avatars.add_attribute_points(avatar_id, amount)?;
        self.push_notification(
            NotificationKind::AttributePointsGranted,
            now,
            json!({
                "avatar_id": avatar_id,
                "amount": amount,
                "unallocated_attribute_points": balance,
            }),
        );
        Ok(balance)
    }

    /// Spends `amount` points from the avatar's unallocated pool onto one
    /// attribute. Additive per call, never a target-setter.
    pub fn set_attributes(
        &mut self,
        caller: &str,
        avatar_id: u64,
        attribute: Attribute,
        amount: u64,
        now: u64,
    ) -> Result<u64, GameError> {
        self.avatars.require_owner(avatar_id, caller)?;
        let new_value = self
            .avatars
            .spend_attribute_points(avatar_id, attribute, amount)?;
        self.push_notification(
            NotificationKind::AttributesRaised,
            now,
            json!({
                "avatar_id": avatar_id,
                "attribute": attribute,
                "amount": amount,
                "new_value": new_value,
            }),
        );
        Ok(new_value)
    }
}
