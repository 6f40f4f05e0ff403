use super::*;

impl Cardinal {
    /// One-time free mint per account. The claim flag is taken before the
    /// avatar exists, so a second call can never observe a half-applied
    /// state.
    pub fn mint_free_avatar(&mut self, account: &str, now: u64) -> Result<Avatar, GameError> {
        self.avatars.claim_free_mint(account)?;
        Ok(self.mint_into_registry(account, now))
    }

    /// Paid mint: no one-per-account restriction, payment checked against
    /// the oracle price. Token custody itself is the substrate's job.
    pub fn mint_avatar(
        &mut self,
        account: &str,
        payment: u128,
        now: u64,
    ) -> Result<Avatar, GameError> {
        if payment < self.oracle.current_price() {
            return Err(GameError::InsufficientPayment);
        }
        Ok(self.mint_into_registry(account, now))
    }

    pub fn set_current_price(
        &mut self,
        caller: &str,
        amount: u128,
        now: u64,
    ) -> Result<(), GameError> {
        self.access.require_role(Role::GameMaster, caller)?;
        self.oracle.set_current_price(amount);
        self.push_notification(
            NotificationKind::PriceUpdated,
            now,
            json!({ "current_price": amount.to_string() }),
        );
        Ok(())
    }

    fn mint_into_registry(&mut self, account: &str, now: u64) -> Avatar {
        let avatar = self.avatars.mint(account, &mut self.entropy, now).clone();
        self.push_notification(
            NotificationKind::NewAvatar,
            now,
            json!({
                "minter": account,
                "avatar_id": avatar.avatar_id,
                "gender": avatar.gender,
                "rarity": avatar.rarity,
            }),
        );
        avatar
    }
}
