//! Demo content for a fresh shop.

use bangbang_auth::Role;

pub struct CategorySeed {
    pub name: &'static str,
    pub name_th: &'static str,
    pub slug: &'static str,
}

pub struct ProductSeed {
    pub name: &'static str,
    pub name_th: &'static str,
    pub description: &'static str,
    /// Price in satang (hundredths of a baht).
    pub price_cents: i64,
    pub image: &'static str,
    pub category_slug: &'static str,
    pub featured: bool,
}

pub struct AccountSeed {
    pub name: &'static str,
    pub email: &'static str,
    pub password: &'static str,
    pub phone: &'static str,
    pub role: Role,
}

pub const CATEGORIES: &[CategorySeed] = &[
    CategorySeed { name: "Sweet Bread", name_th: "ขนมปังหวาน", slug: "sweet-bread" },
    CategorySeed { name: "Savory Bread", name_th: "ขนมปังเค็ม", slug: "savory-bread" },
    CategorySeed { name: "Croissant", name_th: "ครัวซองต์", slug: "croissant" },
    CategorySeed { name: "Danish", name_th: "เดนิช", slug: "danish" },
    CategorySeed { name: "Cake", name_th: "เค้ก", slug: "cake" },
    CategorySeed { name: "Specialty", name_th: "เมนูพิเศษ", slug: "specialty" },
];

pub const PRODUCTS: &[ProductSeed] = &[
    ProductSeed {
        name: "Shokupan",
        name_th: "โชกุปัง",
        description: "ขนมปังสไตล์ญี่ปุ่นนุ่มฟู เนื้อเนียนละเอียด อบสดใหม่ทุกวัน",
        price_cents: 8900,
        image: "https://images.unsplash.com/photo-1586444248879-bc604cbd555a?w=600&q=80",
        category_slug: "sweet-bread",
        featured: true,
    },
    ProductSeed {
        name: "Anpan",
        name_th: "อันปัง (ไส้ถั่วแดง)",
        description: "ขนมปังไส้ถั่วแดงญี่ปุ่น หอมนุ่ม ไส้แน่น",
        price_cents: 4500,
        image: "https://images.unsplash.com/photo-1558961363-fa8fdf82db35?w=600&q=80",
        category_slug: "sweet-bread",
        featured: true,
    },
    ProductSeed {
        name: "Melon Pan",
        name_th: "เมลอนปัง",
        description: "ขนมปังเมลอนกรอบนอกนุ่มใน รสหวานอมเปรี้ยว",
        price_cents: 5500,
        image: "https://images.unsplash.com/photo-1608198093002-ad4e005484ec?w=600&q=80",
        category_slug: "sweet-bread",
        featured: true,
    },
    ProductSeed {
        name: "Curry Bread",
        name_th: "ขนมปังแกงกะหรี่",
        description: "ขนมปังทอดไส้แกงกะหรี่ญี่ปุ่น กรอบร้อนๆ",
        price_cents: 5000,
        image: "https://images.unsplash.com/photo-1549931319-a545753467c8?w=600&q=80",
        category_slug: "savory-bread",
        featured: true,
    },
    ProductSeed {
        name: "Ham & Cheese",
        name_th: "ขนมปังแฮมชีส",
        description: "ขนมปังไส้แฮมชีสเยิ้มๆ อบจนชีสละลาย",
        price_cents: 5500,
        image: "https://images.unsplash.com/photo-1509440159596-0249088772ff?w=600&q=80",
        category_slug: "savory-bread",
        featured: false,
    },
    ProductSeed {
        name: "Butter Croissant",
        name_th: "ครัวซองต์เนย",
        description: "ครัวซองต์เนยฝรั่งเศส กรอบนอกนุ่มใน เนยหอมฟุ้ง",
        price_cents: 6500,
        image: "https://images.unsplash.com/photo-1555507036-ab1f4038024a?w=600&q=80",
        category_slug: "croissant",
        featured: true,
    },
    ProductSeed {
        name: "Chocolate Croissant",
        name_th: "ครัวซองต์ช็อกโกแลต",
        description: "ครัวซองต์สอดไส้ช็อกโกแลตเข้มข้น",
        price_cents: 7500,
        image: "https://images.unsplash.com/photo-1530610476181-d83430b64dcd?w=600&q=80",
        category_slug: "croissant",
        featured: false,
    },
    ProductSeed {
        name: "Cream Danish",
        name_th: "เดนิชครีม",
        description: "เดนิชพายกรอบสอดไส้ครีมคัสตาร์ดนุ่มละมุน",
        price_cents: 6000,
        image: "https://images.unsplash.com/photo-1517433670267-08bbd4be890f?w=600&q=80",
        category_slug: "danish",
        featured: false,
    },
    ProductSeed {
        name: "Strawberry Cake",
        name_th: "เค้กสตรอว์เบอร์รี",
        description: "เค้กสปัญจ์นุ่มๆ ท็อปด้วยสตรอว์เบอร์รีสดและวิปครีม",
        price_cents: 35000,
        image: "https://images.unsplash.com/photo-1565958011703-44f9829ba187?w=600&q=80",
        category_slug: "cake",
        featured: true,
    },
    ProductSeed {
        name: "Matcha Roll",
        name_th: "โรลมัทฉะ",
        description: "โรลเค้กมัทฉะไส้ครีมสดแท้ หอมชาเขียว",
        price_cents: 28000,
        image: "https://images.unsplash.com/photo-1556679343-c7306c1976bc?w=600&q=80",
        category_slug: "specialty",
        featured: false,
    },
];

pub const SETTINGS: &[(&str, &str)] = &[
    ("shop_name", "ปังๆ"),
    ("shop_name_en", "BangBang"),
    ("hero_title", "อบสดใหม่ ทุกวัน"),
    ("hero_subtitle", "ขนมปังสไตล์ญี่ปุ่นแท้ๆ จากเตาถึงมือคุณ"),
    (
        "hero_image",
        "https://images.unsplash.com/photo-1509440159596-0249088772ff?w=1920&q=80",
    ),
    ("qr_image", ""),
    ("bank_name", "ธนาคารกสิกรไทย"),
    ("bank_account", "123-4-56789-0"),
    ("bank_account_name", "บจก. ปังๆ เบเกอรี่"),
    ("shop_phone", "02-123-4567"),
    ("shop_address", "123 ถ.สุขุมวิท แขวงคลองเตย เขตคลองเตย กรุงเทพฯ 10110"),
    ("shop_line", "@bangbang"),
];

pub const ACCOUNTS: &[AccountSeed] = &[
    AccountSeed {
        name: "Admin ปังๆ",
        email: "admin@bangbang.com",
        password: "admin123",
        phone: "0812345678",
        role: Role::Superadmin,
    },
    AccountSeed {
        name: "สมชาย ใจดี",
        email: "somchai@example.com",
        password: "password123",
        phone: "0891234567",
        role: Role::Customer,
    },
];
