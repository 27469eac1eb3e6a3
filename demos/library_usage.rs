// Example of using the Pixpie server SDK as a library
// Reads PIXPIE_REVERSE_URL_ID / PIXPIE_SECRET_KEY from the environment or .env

use pixpie_sdk::{ClientConfig, CropAlign, ImageTransform, ServerApiClient};

fn main() -> anyhow::Result<()> {
    println!("=== Pixpie SDK Library Usage Examples ===\n");

    let client = ServerApiClient::with_config(ClientConfig::from_env()?)?;

    // Example 1: Thumbnail URL for a stored image
    let thumb = ImageTransform::sized(200, 200).quality(80).crop(CropAlign::Top);
    println!("1. Thumbnail URL:\n{}\n", client.get_image_url("photos/cat.jpg", &thumb));

    // Example 2: WebP rendition of an external image
    let webp = ImageTransform::new().width(640).webp(true);
    println!(
        "2. Remote WebP URL:\n{}\n",
        client.get_remote_image_url("https://example.com/banner.png", &webp)
    );

    // Example 3: Upload, then check the folder is there
    println!("3. Uploading ./cat.jpg into photos/:");
    match client.upload_image("./cat.jpg", "photos") {
        Ok(response) => println!("HTTP {}\n", response.status()),
        Err(e) => eprintln!("Error: {}\n", e),
    }

    println!("4. Does photos/ exist at the root?");
    match client.dir_exists("", "photos") {
        Ok(Some(exists)) => println!("{}\n", exists),
        Ok(None) => println!("unknown\n"),
        Err(e) => eprintln!("Error: {}\n", e),
    }

    // Example 5: Clean up
    println!("5. Deleting photos/cat.jpg:");
    let response = client.batch_delete(["photos/cat.jpg"], Vec::<String>::new())?;
    println!("HTTP {}", response.status());

    Ok(())
}
