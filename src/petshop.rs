//! Pet shop catalog and its tab strip.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rarity {
    Common,
    Rare,
    Epic,
}

impl Rarity {
    pub fn label(self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pet {
    pub id: u32,
    pub name: &'static str,
    pub emoji: &'static str,
    pub rarity: Rarity,
    pub price: u32,
}

pub const PETS: [Pet; 8] = [
    Pet { id: 1, name: "Dog", emoji: "🐶", rarity: Rarity::Common, price: 250 },
    Pet { id: 2, name: "Cat", emoji: "🐱", rarity: Rarity::Common, price: 250 },
    Pet { id: 3, name: "Rabbit", emoji: "🐰", rarity: Rarity::Rare, price: 500 },
    Pet { id: 4, name: "Parrot", emoji: "🦜", rarity: Rarity::Rare, price: 500 },
    Pet { id: 5, name: "Fox", emoji: "🦊", rarity: Rarity::Epic, price: 900 },
    Pet { id: 6, name: "Panda", emoji: "🐼", rarity: Rarity::Epic, price: 900 },
    Pet { id: 7, name: "Tiger", emoji: "🐯", rarity: Rarity::Epic, price: 1200 },
    Pet { id: 8, name: "Wolf", emoji: "🐺", rarity: Rarity::Epic, price: 1200 },
];

/// Horizontal drag distance that counts as a swipe.
pub const SWIPE_THRESHOLD: i32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShopTab {
    #[default]
    Pets,
    Skins,
    Accessories,
    Animations,
}

impl ShopTab {
    pub const ALL: [ShopTab; 4] = [
        ShopTab::Pets,
        ShopTab::Skins,
        ShopTab::Accessories,
        ShopTab::Animations,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ShopTab::Pets => "Pets",
            ShopTab::Skins => "Skins",
            ShopTab::Accessories => "Accessories",
            ShopTab::Animations => "Animations",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    /// Tab to the right; stays put on the last tab.
    pub fn next(self) -> Self {
        Self::ALL.get(self.index() + 1).copied().unwrap_or(self)
    }

    /// Tab to the left; stays put on the first tab.
    pub fn previous(self) -> Self {
        self.index()
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i).copied())
            .unwrap_or(self)
    }

    /// Dragging left (negative `dx`) reveals the next tab.
    pub fn after_swipe(self, dx: i32) -> Self {
        if dx < -SWIPE_THRESHOLD {
            self.next()
        } else if dx > SWIPE_THRESHOLD {
            self.previous()
        } else {
            self
        }
    }

    /// Items listed on this tab. Only pets are stocked so far.
    pub fn items(self) -> &'static [Pet] {
        match self {
            ShopTab::Pets => &PETS,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs_clamp_at_both_ends() {
        assert_eq!(ShopTab::Pets.previous(), ShopTab::Pets);
        assert_eq!(ShopTab::Pets.next(), ShopTab::Skins);
        assert_eq!(ShopTab::Animations.next(), ShopTab::Animations);
    }

    #[test]
    fn short_drags_are_not_swipes() {
        assert_eq!(ShopTab::Skins.after_swipe(-40), ShopTab::Skins);
        assert_eq!(ShopTab::Skins.after_swipe(40), ShopTab::Skins);
        assert_eq!(ShopTab::Skins.after_swipe(-41), ShopTab::Accessories);
        assert_eq!(ShopTab::Skins.after_swipe(41), ShopTab::Pets);
    }

    #[test]
    fn catalog_prices_follow_rarity() {
        assert_eq!(ShopTab::Pets.items().len(), 8);
        assert!(ShopTab::Skins.items().is_empty());
        for pet in PETS {
            match pet.rarity {
                Rarity::Common => assert_eq!(pet.price, 250),
                Rarity::Rare => assert_eq!(pet.price, 500),
                Rarity::Epic => assert!(pet.price >= 900),
            }
        }
    }
}
