// unseen-count indicator paired with a visibility flag, one per
// attention surface (cart, notifications, chat messages)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeModel {
    pub count: u32,
    pub visible: bool,
}

impl Default for BadgeModel {
    fn default() -> Self {
        Self {
            count: 0,
            visible: false,
        }
    }
}

impl BadgeModel {
    // incremental path, used by the cart badge on every optimistic add
    pub fn notify_increment(&mut self) {
        self.count += 1;
        self.visible = true;
    }

    // opening the panel hides the indicator, the count stays until a
    // data-driven recompute replaces it
    pub fn acknowledge(&mut self) {
        self.visible = false;
    }

    // recompute path, used by notification / message badges after a
    // refetch counts the unread entries
    pub fn recompute_from_unread(&mut self, num_unread: u32) {
        self.count = num_unread;
        self.visible = num_unread > 0;
    }

    // authoritative overwrite, e.g. cart count recomputed on reload
    pub fn overwrite(&mut self, count: u32) {
        self.count = count;
        self.visible = false;
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.visible = false;
    }
} // end of impl BadgeModel

#[derive(Default)]
pub struct BadgeSetModel {
    pub cart: BadgeModel,
    pub notifications: BadgeModel,
    pub messages: BadgeModel,
}
