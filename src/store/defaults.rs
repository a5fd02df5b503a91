//! Built-in content used on first run or when a persisted slice is unusable.

use super::types::{BlogPost, Destination, Service, SiteSettings};

pub fn settings() -> SiteSettings {
    SiteSettings {
        site_name: "TourWithMe".into(),
        primary_color: "indigo-600".into(),
        hero_title: "Explore the World with TourWithMe".into(),
        hero_subtitle: "Your gateway to unforgettable international adventures and luxury travel experiences.".into(),
        hero_image: "https://picsum.photos/id/1015/1920/1080".into(),
        about_content: "Founded in 2010, TourWithMe has become a global leader in providing bespoke travel experiences. Our mission is to bridge cultures through immersive and sustainable tourism.".into(),
        contact_email: "hello@tourwithme.com".into(),
        contact_phone: "+1 (800) 123-4567".into(),
        contact_address: "123 Travel Avenue, Wanderlust City, WL 54321".into(),
    }
}

fn destination(
    id: &str,
    name: &str,
    region: &str,
    description: &str,
    price: f64,
    image: &str,
    featured: bool,
) -> Destination {
    Destination {
        id: id.into(),
        name: name.into(),
        region: region.into(),
        description: description.into(),
        price,
        image: image.into(),
        featured,
    }
}

pub fn destinations() -> Vec<Destination> {
    vec![
        destination(
            "1",
            "Santorini, Greece",
            "Europe",
            "Breathtaking sunsets and iconic white-washed buildings.",
            1200.0,
            "https://picsum.photos/id/1016/800/600",
            true,
        ),
        destination(
            "2",
            "Kyoto, Japan",
            "Asia",
            "Serene temples, traditional tea houses, and stunning cherry blossoms.",
            1500.0,
            "https://picsum.photos/id/1018/800/600",
            true,
        ),
        destination(
            "3",
            "Bali, Indonesia",
            "Asia",
            "Tropical paradise with lush jungles and vibrant culture.",
            900.0,
            "https://picsum.photos/id/1019/800/600",
            true,
        ),
        destination(
            "4",
            "Amalfi Coast, Italy",
            "Europe",
            "Dramatic cliffs and turquoise waters in the heart of the Mediterranean.",
            1800.0,
            "https://picsum.photos/id/1020/800/600",
            false,
        ),
    ]
}

pub fn blog_posts() -> Vec<BlogPost> {
    vec![
        BlogPost {
            id: "1".into(),
            title: "Top 10 Hidden Gems in Europe".into(),
            excerpt: "Discover the lesser-known spots that will make your European trip unforgettable.".into(),
            content: "Full article content here...".into(),
            author: "Sarah Jenkins".into(),
            date: "2024-05-20".into(),
            image: "https://picsum.photos/id/1021/800/600".into(),
            category: "Travel Tips".into(),
            published: true,
        },
        BlogPost {
            id: "2".into(),
            title: "How to Pack Like a Pro for a Safari".into(),
            excerpt: "Everything you need to know about preparing for your African adventure.".into(),
            content: "Full article content here...".into(),
            author: "Marcus Thorne".into(),
            date: "2024-06-12".into(),
            image: "https://picsum.photos/id/1022/800/600".into(),
            category: "Guides".into(),
            published: true,
        },
    ]
}

pub fn services() -> Vec<Service> {
    [
        ("1", "Tour Packages", "Curated group and private tours worldwide.", "globe"),
        ("2", "Flight Bookings", "Competitive rates for domestic and international flights.", "plane"),
        ("3", "Luxury Hotels", "Exclusive deals at 5-star resorts and boutique hotels.", "home"),
        ("4", "Visa Assistance", "End-to-end support for your travel documentation.", "file"),
    ]
    .into_iter()
    .map(|(id, title, description, icon)| Service {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        icon: icon.into(),
    })
    .collect()
}
