//! Wallet top-ups. Payment is simulated: credits are applied to the local
//! session only.

use bonfire_core::parse_money;

use crate::session::Session;

/// Amounts offered as one-click top-ups, in euros.
pub const QUICK_AMOUNTS: [f64; 5] = [10.0, 15.0, 25.0, 50.0, 100.0];

const PROMO_CODE: &str = "BONFIRE2024";
const PROMO_CREDIT: f64 = 20.0;
const GIFT_CARD_CREDIT: f64 = 5.0;

/// Credit granted for a voucher code, `None` for a blank code.
///
/// The promotional code is matched exactly; any other code counts as a
/// generic gift card.
pub fn redeem_value(code: &str) -> Option<f64> {
    let code = code.trim();
    if code.is_empty() {
        None
    } else if code == PROMO_CODE {
        Some(PROMO_CREDIT)
    } else {
        Some(GIFT_CARD_CREDIT)
    }
}

/// Redeem `code` into the session's wallet. Returns the amount credited.
pub fn redeem(session: &mut Session, code: &str) -> Option<f64> {
    let credit = redeem_value(code)?;
    session.add_funds(credit).then_some(credit)
}

/// Parse a free-form amount such as `"12,50"` or `"7.5 €"`.
pub fn parse_amount(input: &str) -> Option<f64> {
    parse_money(input).filter(|amount| *amount > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bonfire_core::User;

    #[test]
    fn promo_code_is_exact() {
        assert_eq!(redeem_value("BONFIRE2024"), Some(20.0));
        assert_eq!(redeem_value(" BONFIRE2024 "), Some(20.0));
        assert_eq!(redeem_value("bonfire2024"), Some(5.0));
        assert_eq!(redeem_value("XMAS"), Some(5.0));
        assert_eq!(redeem_value("   "), None);
    }

    #[test]
    fn redeem_credits_session() {
        let mut session = Session::new(Some(User::guest()));
        assert_eq!(redeem(&mut session, "BONFIRE2024"), Some(20.0));
        assert_eq!(session.current_user().unwrap().wallet_balance, 170.0);

        let mut logged_out = Session::new(None);
        assert_eq!(redeem(&mut logged_out, "BONFIRE2024"), None);
    }

    #[test]
    fn amounts() {
        assert_eq!(parse_amount("12,50"), Some(12.5));
        assert_eq!(parse_amount("7.5 €"), Some(7.5));
        assert_eq!(parse_amount("0"), None);
        assert_eq!(parse_amount("-3"), None);
        assert_eq!(parse_amount("lots"), None);
    }
}
