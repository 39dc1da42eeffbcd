use crate::session::{CurrentAccount, Flash};
use crate::views::{self, Page, PageContext};

/// Landing page
pub async fn home(account: Option<CurrentAccount>, flash: Flash) -> Page {
    views::home(&PageContext::new(account, flash))
}

/// About page (shares the landing page content)
pub async fn about(account: Option<CurrentAccount>, flash: Flash) -> Page {
    views::home(&PageContext::new(account, flash))
}

pub async fn community(account: Option<CurrentAccount>, flash: Flash) -> Page {
    views::community(&PageContext::new(account, flash))
}
