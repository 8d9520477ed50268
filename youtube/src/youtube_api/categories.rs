/// Display name for a YouTube video category ID.
///
/// Covers the categories assignable to videos in every region. Anything else maps to
/// `"Unknown"`.
///
/// See: <https://developers.google.com/youtube/v3/docs/videoCategories/list>
pub fn category_name(category_id: Option<&str>) -> &'static str {
    match category_id.map(str::trim) {
        Some("1") => "Film & Animation",
        Some("2") => "Autos & Vehicles",
        Some("10") => "Music",
        Some("15") => "Pets & Animals",
        Some("17") => "Sports",
        Some("18") => "Short Movies",
        Some("19") => "Travel & Events",
        Some("20") => "Gaming",
        Some("21") => "Videoblogging",
        Some("22") => "People & Blogs",
        Some("23") => "Comedy",
        Some("24") => "Entertainment",
        Some("25") => "News & Politics",
        Some("26") => "Howto & Style",
        Some("27") => "Education",
        Some("28") => "Science & Technology",
        Some("29") => "Nonprofits & Activism",
        _ => "Unknown",
    }
}
